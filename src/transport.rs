//! Transport seam between the client and the network

use async_trait::async_trait;
use log::{error, trace};
use std::time::Duration;

/// Raw status and body of one POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse
{   pub status: u16
  , pub body: String
}

impl TransportResponse
{   pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }
}

/// "Make a request and resolve with a body"
#[async_trait]
pub trait Transport: Send + Sync
{   async fn post_json(
      &self
    , url: &str
    , query: &[(&str, &str)]
    , body: &serde_json::Value
    ) -> Result<TransportResponse, crate::error::Error>;
}

/// reqwest backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport
{   http_client: reqwest::Client
}

impl ReqwestTransport
{   pub fn new(timeout_secs: Option<u64>)
      -> Result<Self, crate::error::Error>
    {   let mut builder = reqwest::Client::builder()
          .user_agent(concat!(
            "interview-ai/", env!("CARGO_PKG_VERSION")
          ));
        if let Some(secs) = timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;
        Ok(ReqwestTransport { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport
{   async fn post_json(
      &self
    , url: &str
    , query: &[(&str, &str)]
    , body: &serde_json::Value
    ) -> Result<TransportResponse, crate::error::Error>
    {   let response = self.http_client
          .post(url)
          .query(query)
          .header("Content-Type", "application/json")
          .json(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::Http(e.to_string())
          })?;

        let status = response.status().as_u16();
        trace!("Response status: {}", status);

        let body = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          crate::error::Error::Http(e.to_string())
        })?;

        Ok(TransportResponse { status, body })
    }
}
