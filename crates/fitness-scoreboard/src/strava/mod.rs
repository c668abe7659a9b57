//! Strava adapter for the [`ActivitySource`](crate::source::ActivitySource) contract.

mod auth;
mod client;
#[cfg(test)]
mod test_server;

pub use auth::{refresh_access_token, AccessToken, StravaCredentials, DEFAULT_TOKEN_URL};
pub use client::StravaClient;

pub const DEFAULT_API_URL: &str = "https://www.strava.com/api/v3";

use crate::source::SourceError;
use serde::de::DeserializeOwned;

fn transport(err: reqwest::Error) -> SourceError {
    SourceError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SourceError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    serde_json::from_slice(&body).map_err(|err| SourceError::Decode(err.to_string()))
}
