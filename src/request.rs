//! Request payload types for generateContent

use serde::{Deserialize, Serialize};

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>
  , pub parts: Vec<Part>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part
{   pub text: String
}

impl Content
{   pub fn user(text: impl Into<String>) -> Self
    {   Content
        {   role: Some("user".to_string())
          , parts: vec![Part { text: text.into() }]
        }
    }

    pub fn model(text: impl Into<String>) -> Self
    {   Content
        {   role: Some("model".to_string())
          , parts: vec![Part { text: text.into() }]
        }
    }

    /// Turn without a role, as the speech endpoint expects
    pub fn bare(text: impl Into<String>) -> Self
    {   Content
        {   role: None
          , parts: vec![Part { text: text.into() }]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig
{   pub voice_name: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig
{   pub prebuilt_voice_config: PrebuiltVoiceConfig
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig
{   pub voice_config: VoiceConfig
}

/// Generation configuration, including the optional output schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>
  , /// Declared output shape, passed through as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>
}

impl GenerationConfig
{   pub fn plain_text() -> Self
    {   GenerationConfig
        {   response_mime_type: Some("text/plain".to_string())
          , ..Default::default()
        }
    }

    pub fn json(schema: serde_json::Value) -> Self
    {   GenerationConfig
        {   response_mime_type
              : Some("application/json".to_string())
          , response_schema: Some(schema)
          , ..Default::default()
        }
    }

    pub fn audio(voice: impl Into<String>) -> Self
    {   GenerationConfig
        {   response_modalities: Some(vec!["AUDIO".to_string()])
          , speech_config: Some(SpeechConfig
            {   voice_config: VoiceConfig
                {   prebuilt_voice_config: PrebuiltVoiceConfig
                    {   voice_name: voice.into()
                    }
                }
            })
          , ..Default::default()
        }
    }
}

/// Conversation turns plus generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest
{   pub contents: Vec<Content>
  , pub generation_config: GenerationConfig
}
