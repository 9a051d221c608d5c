use std::fmt;

/// Error type for generative endpoint calls
/// Implements Clone so it can be stored and re-reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Credential rejected by the endpoint (401)
    Auth(u16)
  , /// Still rate limited after every retry was spent
    RateLimitExhausted(u32)
  , /// Non-success status that is not worth retrying
    Status
    {   status: u16
      , body: String
    }
  , /// Transport failure: connect, timeout, unreadable body
    Http(String)
  , /// 2xx body was not a JSON document
    Decode(String)
  , /// Call abandoned through its cancellation token
    Cancelled
  , /// Invalid configuration
    InvalidConfiguration(String)
}

/// Machine readable classification of a terminal failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind
{   Auth
  , RateLimitedExhausted
  , Network
  , Unknown
  , Cancelled
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::Auth(_) => ErrorKind::Auth
          , Error::RateLimitExhausted(_) => {
              ErrorKind::RateLimitedExhausted
            }
          , Error::Status { .. } | Error::Http(_) => {
              ErrorKind::Network
            }
          , Error::Decode(_) | Error::InvalidConfiguration(_) => {
              ErrorKind::Unknown
            }
          , Error::Cancelled => ErrorKind::Cancelled
        }
    }

    /// Auth failures hold for the whole session until the key changes
    pub fn is_session_fatal(&self) -> bool
    {   self.kind() == ErrorKind::Auth
    }

    /// Text for the caller's error display slot
    pub fn user_message(&self) -> String
    {   match self
        {   Error::Auth(status) => {
              format!(
                "Authentication Error ({}): \
                 The API key is likely missing or invalid.",
                status
              )
            }
          , Error::RateLimitExhausted(_) => {
              "Failed to get a response after multiple retries. \
               Please check your network."
                .to_string()
            }
          , other => {
              format!("Failed to get a response: {}", other)
            }
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Auth(status) => {
              write!(f, "Authentication Error ({})", status)
            }
          , Error::RateLimitExhausted(retries) => {
              write!(f,
                "Rate limited after {} retries",
                retries
              )
            }
          , Error::Status { status, .. } => {
              write!(f, "HTTP error! status: {}", status)
            }
          , Error::Http(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Decode(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::Cancelled => {
              write!(f, "Request cancelled")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   Error::Http(e.to_string())
    }
}
