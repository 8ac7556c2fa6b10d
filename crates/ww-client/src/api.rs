//! HTTP access to the message store endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use ww_core::models::{GuestMessage, NewWish};

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout or body-decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
}

/// What the views need from the endpoint.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait WishesApi: Send + Sync {
    /// The full list, in store order.
    async fn fetch_wishes(&self) -> Result<Vec<GuestMessage>, ClientError>;

    /// Posts one wish and returns the record the server created.
    async fn submit_wish(&self, wish: &NewWish) -> Result<GuestMessage, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpWishesClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpWishesClient {
    /// `endpoint` is the full URL of the wishes resource,
    /// e.g. `http://127.0.0.1:8888/api/wishes`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Turns a non-success response into `ClientError::Status`, using the
/// `{error}` body when there is one.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl WishesApi for HttpWishesClient {
    async fn fetch_wishes(&self) -> Result<Vec<GuestMessage>, ClientError> {
        let response = check(self.http.get(&self.endpoint).send().await?).await?;
        let wishes: Vec<GuestMessage> = response.json().await?;
        debug!(count = wishes.len(), "fetched wishes");
        Ok(wishes)
    }

    async fn submit_wish(&self, wish: &NewWish) -> Result<GuestMessage, ClientError> {
        let response = check(self.http.post(&self.endpoint).json(wish).send().await?).await?;
        Ok(response.json().await?)
    }
}
