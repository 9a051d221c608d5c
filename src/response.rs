//! Response shape handling: plain text, structured JSON and inline audio.
//!
//! Nothing here fails past its boundary. Plain text falls back to a
//! fixed string, structured decodes return a `Result`, and the review
//! and analysis resolvers always hand back something renderable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use log::{debug, error, warn};

pub const FALLBACK_TEXT: &str = "Failed to get a response.";
pub const FALLBACK_FOLLOW_UP: &str
  = "I apologize, I could not generate a response. Please try again.";

const TEXT_PATH: &str = "/candidates/0/content/parts/0/text";
const INLINE_DATA_PATH: &str = "/candidates/0/content/parts/0/inlineData";

/// Text of the first candidate's first part, if present and non-empty
pub fn text(body: &serde_json::Value) -> Option<&str>
{   body.pointer(TEXT_PATH)
      .and_then(|v| v.as_str())
      .filter(|t| !t.is_empty())
}

/// Plain text mode: the text, or `fallback` when the call failed or
/// the field is missing
pub fn text_or(body: Option<&serde_json::Value>, fallback: &str)
  -> String
{   match body.and_then(text)
    {   Some(t) => t.to_string()
      , None => {
          warn!("Response had no text, using fallback");
          fallback.to_string()
        }
    }
}

/// Why a structured payload could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredError
{   /// No text field at the expected path
    MissingText
  , /// Text was not JSON of the declared shape
    Malformed(String)
}

impl fmt::Display for StructuredError
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   StructuredError::MissingText => {
              write!(f, "response contained no text")
            }
          , StructuredError::Malformed(msg) => {
              write!(f, "response text was not valid JSON: {}", msg)
            }
        }
    }
}

impl std::error::Error for StructuredError {}

/// Structured mode: decode the text field as `T`
pub fn structured<T>(body: &serde_json::Value)
  -> Result<T, StructuredError>
where T: DeserializeOwned
{   let raw = text(body).ok_or(StructuredError::MissingText)?;
    serde_json::from_str(raw).map_err(|e| {
      error!("Failed to parse structured response: {}", e);
      StructuredError::Malformed(e.to_string())
    })
}

// ===== Job description analysis =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysis
{   #[serde(default)]
    pub skills: Vec<String>
  , #[serde(default)]
    pub questions: Vec<String>
}

/// What the analysis screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome
{   Ready(JobAnalysis)
  , Failed
    {   message: String
    }
}

impl AnalysisOutcome
{   pub fn failed(message: &str) -> Self
    {   AnalysisOutcome::Failed { message: message.to_string() }
    }
}

pub const ANALYSIS_EMPTY_INPUT: &str
  = "Please enter a job description to analyze.";
pub const ANALYSIS_MALFORMED: &str
  = "Failed to generate analysis. The API response was not valid JSON.";
pub const ANALYSIS_NO_RESPONSE: &str
  = "No analysis could be generated. Please check your internet \
     connection and try again.";

pub fn resolve_analysis(
  parsed: Result<JobAnalysis, StructuredError>
) -> AnalysisOutcome
{   match parsed
    {   Ok(analysis) => {
          debug!(
            "Analysis: {} skills, {} questions",
            analysis.skills.len(), analysis.questions.len()
          );
          AnalysisOutcome::Ready(analysis)
        }
      , Err(_) => AnalysisOutcome::failed(ANALYSIS_MALFORMED)
    }
}

// ===== Interview review =====

/// One reviewed question and answer pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem
{   #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String
  , #[serde(default, deserialize_with = "null_as_empty")]
    pub your_answer: String
  , #[serde(default, deserialize_with = "null_as_empty")]
    pub evaluation: String
  , #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: String
  , #[serde(default, deserialize_with = "null_as_empty")]
    pub suggested_answer: String
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de>
{   Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ReviewItem
{   fn new(
      question: &str
    , your_answer: &str
    , evaluation: &str
    , explanation: &str
    , suggested_answer: &str
    ) -> Self
    {   ReviewItem
        {   question: question.to_string()
          , your_answer: your_answer.to_string()
          , evaluation: evaluation.to_string()
          , explanation: explanation.to_string()
          , suggested_answer: suggested_answer.to_string()
        }
    }

    /// Answer too brief to evaluate; keeps the original pair
    pub fn needs_more_detail(question: &str, your_answer: &str) -> Self
    {   ReviewItem::new(
          question,
          your_answer,
          "Needs more detail",
          "Your answer was too brief. Please provide more context and \
           specific examples.",
          "Try again by providing a more comprehensive response to the \
           question."
        )
    }

    /// Review came back empty
    pub fn insufficient_detail() -> Self
    {   ReviewItem::new(
          "No questions were answered with enough detail.",
          "Your answers were too brief for a meaningful review.",
          "Cannot review",
          "The AI needs substantial answers to generate a proper \
           evaluation. Try again by providing more detailed responses.",
          "Please try again and provide more specific examples and \
           explanations."
        )
    }

    /// Review text was not the declared JSON array
    pub fn malformed() -> Self
    {   ReviewItem::new(
          "Review Generation Failed",
          "An error occurred while processing the review.",
          "Error",
          "The API returned an invalid response. Please try the \
           interview again.",
          "Try refreshing the page and starting a new interview to \
           resolve the issue."
        )
    }

    /// The call itself failed
    pub fn no_response() -> Self
    {   ReviewItem::new(
          "Review Generation Failed",
          "An error occurred while generating the review.",
          "Error",
          "The API returned no response. This may be a network issue. \
           Please try again.",
          "Check your internet connection and try the interview again."
        )
    }
}

/// Decode review text. Valid JSON that is not an array counts as an
/// empty review, and non-object entries become blank items.
pub fn review_items(body: &serde_json::Value)
  -> Result<Vec<ReviewItem>, StructuredError>
{   match structured::<serde_json::Value>(body)?
    {   serde_json::Value::Array(entries) => {
          entries
            .into_iter()
            .map(|entry| match entry
            {   serde_json::Value::Object(_) => {
                  serde_json::from_value(entry).map_err(|e| {
                    error!("Failed to parse review item: {}", e);
                    StructuredError::Malformed(e.to_string())
                  })
                }
              , _ => Ok(ReviewItem::default())
            })
            .collect()
        }
      , other => {
          warn!("Review was not an array: {}", other);
          Ok(vec![])
        }
    }
}

/// Always returns at least one item
pub fn resolve_review(
  parsed: Result<Vec<ReviewItem>, StructuredError>
) -> Vec<ReviewItem>
{   match parsed
    {   Ok(items) => match items.first()
        {   None => {
              warn!("Review came back empty");
              vec![ReviewItem::insufficient_detail()]
            }
          , Some(first) if first.evaluation.is_empty() => {
              warn!("First review item has no evaluation");
              vec![ReviewItem::needs_more_detail(
                &first.question,
                &first.your_answer
              )]
            }
          , Some(_) => items
        }
      , Err(_) => vec![ReviewItem::malformed()]
    }
}

// ===== Inline audio =====

/// Base64 audio part of a speech response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData
{   pub mime_type: String
  , pub data: String
}

/// Inline audio of the first part, if the MIME type is audio
pub fn inline_audio(body: &serde_json::Value) -> Option<InlineData>
{   let value = body.pointer(INLINE_DATA_PATH)?;
    let inline: InlineData
      = serde_json::from_value(value.clone()).ok()?;
    if inline.data.is_empty() || !inline.mime_type.starts_with("audio/")
    {   return None;
    }
    Some(inline)
}
