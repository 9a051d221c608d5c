//! Interview practice session on top of the generative client.
//!
//! Every action resolves. Action scoped failures (exhausted retries,
//! network, malformed output) become fallback content, and only two
//! things come back as `Err`: an auth failure, which locks the session
//! until the key is replaced, and cancellation after `close`.

use tokio_util::sync::CancellationToken;
use log::{debug, info, warn};

use crate::audio::{SpeechAudio, SpeechError};
use crate::client::GenerativeClient;
use crate::error::Error;
use crate::response::{self, AnalysisOutcome, JobAnalysis, ReviewItem};
use crate::{prompt, ChatMessage, Sender};

pub const ANALYSIS_MALFORMED_NOTICE: &str
  = "The API response for analysis was malformed. Please try again.";
pub const REVIEW_MALFORMED_NOTICE: &str
  = "The API response for review was malformed. Please try again.";

pub struct InterviewSession
{   client: GenerativeClient
  , role: Option<String>
  , messages: Vec<ChatMessage>
  , auth_failure: Option<Error>
  , cancel: CancellationToken
}

impl InterviewSession
{   pub fn new(client: GenerativeClient) -> Self
    {   InterviewSession
        {   client
          , role: None
          , messages: vec![]
          , auth_failure: None
          , cancel: CancellationToken::new()
        }
    }

    pub fn role(&self) -> Option<&str>
    {   self.role.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage]
    {   &self.messages
    }

    /// Current `apiError` text for display
    pub fn api_error(&self) -> Option<String>
    {   self.client.error_slot().get()
    }

    pub fn is_locked(&self) -> bool
    {   self.auth_failure.is_some()
    }

    /// Replace the credential and lift an auth lock
    pub fn set_api_key(&mut self, key: String)
    {   self.client.set_api_key(key);
        if self.auth_failure.take().is_some()
        {   info!("Credential replaced, session unlocked");
            self.client.error_slot().replace(None);
        }
    }

    /// Abandon in-flight calls; later actions return `Cancelled`
    pub fn close(&self)
    {   debug!("Closing interview session");
        self.cancel.cancel();
    }

    /// Token that `close` cancels, for callers tearing down elsewhere
    pub fn cancellation_token(&self) -> CancellationToken
    {   self.cancel.clone()
    }

    /// Fails while locked by an auth failure or after `close`
    fn ensure_open(&self) -> Result<(), Error>
    {   if let Some(e) = &self.auth_failure
        {   warn!("Session locked by earlier auth failure");
            return Err(e.clone());
        }
        if self.cancel.is_cancelled()
        {   return Err(Error::Cancelled);
        }
        Ok(())
    }

    async fn call_raw(
      &mut self
    , payload: &crate::request::GenerateRequest
    , model: &str
    ) -> Result<serde_json::Value, Error>
    {   self.ensure_open()?;

        let result = self.client
          .generate_with_cancellation(payload, model, &self.cancel)
          .await;
        if let Err(e) = &result
        {   if e.is_session_fatal()
            {   self.auth_failure = Some(e.clone());
            }
        }
        result
    }

    /// `None` when the failure only affects this action
    async fn call(
      &mut self
    , payload: &crate::request::GenerateRequest
    , model: &str
    ) -> Result<Option<serde_json::Value>, Error>
    {   match self.call_raw(payload, model).await
        {   Ok(body) => Ok(Some(body))
          , Err(e) if e.is_session_fatal() => Err(e)
          , Err(Error::Cancelled) => Err(Error::Cancelled)
          , Err(e) => {
              debug!("Action failed, falling back: {}", e);
              Ok(None)
            }
        }
    }

    fn chat_model(&self) -> String
    {   self.client.config().chat_model.clone()
    }

    /// Extract key skills and sample questions from a job description
    pub async fn analyze_job_description(
      &mut self
    , description: &str
    ) -> Result<AnalysisOutcome, Error>
    {   if description.trim().is_empty()
        {   self.client.error_slot().replace(None);
            return Ok(AnalysisOutcome::failed(
              response::ANALYSIS_EMPTY_INPUT
            ));
        }

        let payload = prompt::analyze_job_description(description);
        let model = self.chat_model();
        let body = match self.call(&payload, &model).await?
        {   Some(body) => body
          , None => {
              return Ok(AnalysisOutcome::failed(
                response::ANALYSIS_NO_RESPONSE
              ));
            }
        };

        let parsed = response::structured::<JobAnalysis>(&body);
        if parsed.is_err()
        {   self.client.error_slot()
              .replace(Some(ANALYSIS_MALFORMED_NOTICE.to_string()));
        }
        Ok(response::resolve_analysis(parsed))
    }

    /// Start a fresh interview for `role`, returning the first question
    pub async fn start_interview(&mut self, role: &str)
      -> Result<String, Error>
    {   self.ensure_open()?;
        info!("Starting interview for {}", role);
        self.role = Some(role.to_string());
        self.messages.clear();

        let payload = prompt::start_interview(role);
        let model = self.chat_model();
        let body = self.call(&payload, &model).await?;

        let text = response::text_or(
          body.as_ref(),
          response::FALLBACK_TEXT
        );
        self.messages.push(ChatMessage::ai(text.clone()));
        Ok(text)
    }

    /// Send the candidate's answer. Returns `None` for a blank answer
    /// or when no interview has been started.
    pub async fn send_answer(&mut self, answer: &str)
      -> Result<Option<String>, Error>
    {   let role = match &self.role
        {   Some(role) if !answer.trim().is_empty() => role.clone()
          , _ => return Ok(None)
        };

        self.ensure_open()?;

        let payload = prompt::follow_up(&role, &self.messages, answer);
        self.messages.push(ChatMessage::user(answer));

        let model = self.chat_model();
        let body = match self.call(&payload, &model).await
        {   Ok(body) => body
          , Err(e) => {
              // an unanswered turn is not kept
              self.messages.pop();
              return Err(e);
            }
        };

        let text = response::text_or(
          body.as_ref(),
          response::FALLBACK_FOLLOW_UP
        );
        self.messages.push(ChatMessage::ai(text.clone()));
        Ok(Some(text))
    }

    /// Review the interview so far. Never returns an empty list.
    pub async fn end_interview(&mut self)
      -> Result<Vec<ReviewItem>, Error>
    {   self.client.error_slot().replace(None);
        let role = self.role.clone().unwrap_or_default();
        let payload = prompt::review(&role, &self.messages);
        let model = self.chat_model();

        let body = match self.call(&payload, &model).await?
        {   Some(body) => body
          , None => return Ok(vec![ReviewItem::no_response()])
        };

        let parsed = response::review_items(&body);
        if parsed.is_err()
        {   self.client.error_slot()
              .replace(Some(REVIEW_MALFORMED_NOTICE.to_string()));
        }
        Ok(response::resolve_review(parsed))
    }

    /// Synthesize `text` as speech
    pub async fn speak(&mut self, text: &str)
      -> Result<SpeechAudio, SpeechError>
    {   let payload = prompt::speak(text);
        let model = self.client.config().speech_model.clone();
        let body = self.call_raw(&payload, &model).await?;
        crate::audio::decode_speech(&body)
    }
}

impl ChatMessage
{   pub fn ai(text: impl Into<String>) -> Self
    {   ChatMessage { sender: Sender::Ai, text: text.into() }
    }

    pub fn user(text: impl Into<String>) -> Self
    {   ChatMessage { sender: Sender::User, text: text.into() }
    }
}
