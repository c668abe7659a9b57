use super::{decode, transport};
use crate::source::SourceError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Long-lived credentials kept in a local file for command-line use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StravaCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl StravaCredentials {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Short-lived token returned by the refresh grant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Exchanges a refresh token for a fresh access token.
pub async fn refresh_access_token(
    http: &reqwest::Client,
    token_url: &str,
    credentials: &StravaCredentials,
) -> Result<AccessToken, SourceError> {
    tracing::info!(client_id = %credentials.client_id, "refreshing access token");
    let response = http
        .post(token_url)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token.as_str()),
        ])
        .send()
        .await
        .map_err(transport)?;
    decode(response).await
}
