//! Configuration for the generative client and its retry behavior

use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_MODEL: &str
  = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_SPEECH_MODEL: &str
  = "gemini-2.5-flash-preview-tts";

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig
{   /// Retries after the first attempt, only spent on 429
    pub max_retries: u32
  , /// Delay before the first retry, doubled each time
    pub base_delay_ms: u64
}

impl Default for RetryConfig
{   fn default() -> Self
    {   RetryConfig
        {   max_retries: 3
          , base_delay_ms: 1000
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig
{   /// API base URL, without trailing slash
    pub api_base: String
  , /// Credential sent as the `key` query parameter
    pub api_key: Option<String>
  , /// Request timeout in seconds
    pub timeout_secs: Option<u64>
  , /// Model used for chat, analysis and review
    pub chat_model: String
  , /// Model used for speech output
    pub speech_model: String
  , pub retry: RetryConfig
}

impl Default for ClientConfig
{   fn default() -> Self
    {   ClientConfig
        {   api_base: DEFAULT_API_BASE.to_string()
          , api_key: None
          , timeout_secs: Some(60)
          , chat_model: DEFAULT_CHAT_MODEL.to_string()
          , speech_model: DEFAULT_SPEECH_MODEL.to_string()
          , retry: RetryConfig::default()
        }
    }
}

impl ClientConfig
{   /// Read GEMINI_API_KEY, GEMINI_API_BASE and GEMINI_TIMEOUT_SECS.
    /// A missing key is not an error here; it shows up as an auth
    /// failure on the first call.
    pub fn from_env() -> Self
    {   let mut config = ClientConfig::default();

        match std::env::var("GEMINI_API_KEY")
        {   Ok(key) if !key.trim().is_empty() => {
              config.api_key = Some(key);
            }
          , _ => {
              warn!("GEMINI_API_KEY not set");
            }
        }

        if let Ok(base) = std::env::var("GEMINI_API_BASE")
        {   debug!("Using API base from env: {}", base);
            config.api_base
              = base.trim_end_matches('/').to_string();
        }

        if let Ok(secs) = std::env::var("GEMINI_TIMEOUT_SECS")
        {   match secs.parse::<u64>()
            {   Ok(secs) => config.timeout_secs = Some(secs)
              , Err(_) => {
                  warn!("Ignoring bad GEMINI_TIMEOUT_SECS: {}", secs);
                }
            }
        }

        config
    }

    pub fn with_api_base(mut self, base: impl Into<String>)
      -> Self
    {   self.api_base
          = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>)
      -> Self
    {   self.api_key = Some(key.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self
    {   self.retry = retry;
        self
    }

    /// generateContent endpoint for a model
    pub fn endpoint(&self, model: &str) -> String
    {   format!("{}/models/{}:generateContent", self.api_base, model)
    }
}
