//! Shared test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

use interview_ai::error::Error;
use interview_ai::transport::{Transport, TransportResponse};
use interview_ai::{ClientConfig, GenerativeClient};

/// One recorded POST
#[derive(Debug, Clone)]
pub struct RecordedCall
{   pub at: Instant
  , pub url: String
  , pub query: Vec<(String, String)>
  , pub body: serde_json::Value
}

/// Transport that replays a fixed script of outcomes.
/// Once the script runs out every call answers with `fallback`.
pub struct ScriptedTransport
{   script: Mutex<VecDeque<Result<TransportResponse, Error>>>
  , fallback: TransportResponse
  , calls: Mutex<Vec<RecordedCall>>
}

impl ScriptedTransport
{   pub fn new(
      script: Vec<Result<TransportResponse, Error>>
    ) -> Arc<Self>
    {   ScriptedTransport::with_fallback(script, status(200, "{}"))
    }

    pub fn with_fallback(
      script: Vec<Result<TransportResponse, Error>>
    , fallback: TransportResponse
    ) -> Arc<Self>
    {   Arc::new(ScriptedTransport
        {   script: Mutex::new(script.into())
          , fallback
          , calls: Mutex::new(vec![])
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall>
    {   self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize
    {   self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport
{   async fn post_json(
      &self
    , url: &str
    , query: &[(&str, &str)]
    , body: &serde_json::Value
    ) -> Result<TransportResponse, Error>
    {   self.calls.lock().unwrap().push(RecordedCall
        {   at: Instant::now()
          , url: url.to_string()
          , query: query
              .iter()
              .map(|(k, v)| (k.to_string(), v.to_string()))
              .collect()
          , body: body.clone()
        });
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

pub fn status(status: u16, body: &str) -> TransportResponse
{   TransportResponse { status, body: body.to_string() }
}

/// 200 response whose first part carries `text`
pub fn text_response(text: &str) -> TransportResponse
{   status(200, &text_body(text).to_string())
}

pub fn text_body(text: &str) -> serde_json::Value
{   json!({
      "candidates": [
        { "content": { "role": "model", "parts": [ { "text": text } ] } }
      ]
    })
}

pub fn test_config() -> ClientConfig
{   ClientConfig::default()
      .with_api_base("https://example.test/v1beta")
      .with_api_key("test-key")
}

pub fn scripted_client(
  script: Vec<Result<TransportResponse, Error>>
) -> (GenerativeClient, Arc<ScriptedTransport>)
{   let transport = ScriptedTransport::new(script);
    let client = GenerativeClient::with_transport(
      test_config(),
      transport.clone()
    );
    (client, transport)
}
