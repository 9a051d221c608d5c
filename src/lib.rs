pub mod error;
pub mod config;
pub mod retry;
pub mod slot;
pub mod transport;
pub mod client;
pub mod request;
pub mod prompt;
pub mod response;
pub mod audio;
pub mod roles;
pub mod session;
use serde::{Deserialize, Serialize};

/*

interview-ai: the generative side of interview practice.

One client talks to the generateContent endpoint, retries 429s with
exponential backoff (1s, 2s, 4s, then gives up) and classifies every
other failure. Sessions sit on top and turn raw bodies into chat turns,
job analyses, interview reviews and speech clips, falling back to fixed
placeholder content rather than failing.

src/
├── lib.rs          # Re-exports and shared chat types
├── error.rs        # Error and its classification
├── config.rs       # Endpoint, credential and retry configuration
├── retry.rs        # Backoff policy and status classification
├── slot.rs         # Caller visible error message slot
├── transport.rs    # POST seam, reqwest implementation
├── client.rs       # Retry loop
├── request.rs      # Payload types
├── prompt.rs       # Payload builders per flow
├── response.rs     # Text / structured / audio extraction, placeholders
├── audio.rs        # PCM16 -> WAV
├── roles.rs        # Quick start roles
└── session.rs      # Interview session

*/

pub use client::GenerativeClient;
pub use config::{ClientConfig, RetryConfig};
pub use error::{Error, ErrorKind};
pub use session::InterviewSession;
pub use slot::ErrorSlot;

/// Who wrote a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender
{   /// The interviewer model
    Ai
  , /// The candidate
    User
}

/// One turn of the interview chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub sender: Sender
  , pub text: String
}
