use std::sync::Arc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use log::{debug, trace, error, info, warn};

use crate::error::Error;
use crate::retry::{classify_status, RetryPolicy, StatusAction};
use crate::slot::ErrorSlot;
use crate::transport::{ReqwestTransport, Transport};

/// Client for the generateContent endpoint.
///
/// One call is one logical request: 429 responses are retried with
/// exponential backoff, everything else resolves on the first answer.
/// Cloning shares the transport and the error slot; concurrent calls
/// keep independent retry state.
#[derive(Clone)]
pub struct GenerativeClient
{   config: crate::config::ClientConfig
  , policy: RetryPolicy
  , transport: Arc<dyn Transport>
  , error_slot: ErrorSlot
}

impl GenerativeClient
{   /// Create a client on top of reqwest
    pub fn new(
      config: crate::config::ClientConfig
    ) -> Result<Self, Error>
    {   let transport
          = ReqwestTransport::new(config.timeout_secs)?;
        Ok(GenerativeClient::with_transport(
          config,
          Arc::new(transport)
        ))
    }

    /// Create a client over any transport
    pub fn with_transport(
      config: crate::config::ClientConfig
    , transport: Arc<dyn Transport>
    ) -> Self
    {   debug!(
          "Creating GenerativeClient for {}",
          config.api_base
        );
        GenerativeClient
        {   policy: RetryPolicy::from(&config.retry)
          , config
          , transport
          , error_slot: ErrorSlot::new()
        }
    }

    pub fn config(&self) -> &crate::config::ClientConfig
    {   &self.config
    }

    pub fn policy(&self) -> &RetryPolicy
    {   &self.policy
    }

    /// The `apiError` slot updated by every call
    pub fn error_slot(&self) -> &ErrorSlot
    {   &self.error_slot
    }

    pub fn has_api_key(&self) -> bool
    {   self.config.api_key.is_some()
    }

    pub fn set_api_key(&mut self, key: String)
    {   debug!("Setting API key");
        self.config.api_key = Some(key);
    }

    /// Send `payload` to `model`, returning the decoded body unmodified
    pub async fn generate<P>(
      &self
    , payload: &P
    , model: &str
    ) -> Result<serde_json::Value, Error>
    where P: Serialize + ?Sized
    {   self.generate_with_cancellation(
          payload,
          model,
          &CancellationToken::new()
        ).await
    }

    /// Like `generate`, but gives up as soon as `cancel` fires.
    /// A cancelled call never touches the error slot.
    pub async fn generate_with_cancellation<P>(
      &self
    , payload: &P
    , model: &str
    , cancel: &CancellationToken
    ) -> Result<serde_json::Value, Error>
    where P: Serialize + ?Sized
    {   let ticket = self.error_slot.begin();

        let result = match serde_json::to_value(payload)
        {   Ok(body) => self.run(&body, model, cancel).await
          , Err(e) => {
              error!("Failed to serialize payload: {}", e);
              Err(Error::Decode(e.to_string()))
            }
        };

        if cancel.is_cancelled()
        {   info!("Call to {} cancelled, result discarded", model);
            return Err(Error::Cancelled);
        }

        match &result
        {   Ok(_) => {
              self.error_slot.clear(ticket);
            }
          , Err(e) => {
              error!("Error fetching from {}: {}", model, e);
              self.error_slot.set(ticket, e.user_message());
            }
        }
        result
    }

    async fn run(
      &self
    , body: &serde_json::Value
    , model: &str
    , cancel: &CancellationToken
    ) -> Result<serde_json::Value, Error>
    {   let url = self.config.endpoint(model);
        let query: Vec<(&str, &str)> = match &self.config.api_key
        {   Some(key) => vec![("key", key.as_str())]
          , None => vec![]
        };
        let mut attempt: u32 = 0;

        loop
        {   if cancel.is_cancelled()
            {   return Err(Error::Cancelled);
            }

            debug!("POST {} (attempt {})", url, attempt + 1);
            let response = tokio::select!
            {   response = self.transport.post_json(&url, &query, body) => {
                  response?
                }
              , _ = cancel.cancelled() => {
                  return Err(Error::Cancelled);
                }
            };

            if response.is_success()
            {   trace!("Response body: {}", response.body);
                return serde_json::from_str(&response.body)
                  .map_err(|e| {
                    error!("Parse error: {}", e);
                    Error::Decode(e.to_string())
                  });
            }

            match classify_status(response.status)
            {   StatusAction::Auth => {
                  error!("Credential rejected ({})", response.status);
                  return Err(Error::Auth(response.status));
                }
              , StatusAction::Fail => {
                  return Err(Error::Status
                  {   status: response.status
                    , body: response.body
                  });
                }
              , StatusAction::Retry => {
                  if !self.policy.can_retry(attempt)
                  {   warn!(
                        "Still rate limited after {} retries",
                        attempt
                      );
                      return Err(Error::RateLimitExhausted(attempt));
                  }
                  let delay = self.policy.backoff_for_attempt(attempt);
                  warn!(
                    "Rate limited, retrying after {}ms",
                    delay.as_millis()
                  );
                  tokio::select!
                  {   _ = tokio::time::sleep(delay) => {}
                    , _ = cancel.cancelled() => {
                        return Err(Error::Cancelled);
                      }
                  }
                  attempt += 1;
                }
            }
        }
    }
}
