use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result, debug, types::Token};

/// Seconds before expiry at which an access token is refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the OAuth token of the CLI and keeps it fresh.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
    token_url: String,
    client_id: String,
}

impl TokenManager {
    pub fn new(token: Token, path: PathBuf, token_url: String, client_id: String) -> Self {
        Self {
            token,
            path,
            token_url,
            client_id,
        }
    }

    /// Loads the token persisted by a previous `genrelists auth`.
    pub async fn load(path: PathBuf, token_url: String, client_id: String) -> Result<Self> {
        let content = async_fs::read_to_string(&path).await.map_err(|e| {
            Error::Auth(format!(
                "no token at {} ({}). Please run genrelists auth",
                path.display(),
                e
            ))
        })?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self::new(token, path, token_url, client_id))
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.is_expired() {
            debug!("Access token expired, refreshing");
            self.token = self.refresh_token().await?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    async fn refresh_token(&self) -> Result<Token> {
        let res = Client::new()
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.token.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let json: Value = res.json().await?;
        let access_token = json["access_token"]
            .as_str()
            .ok_or_else(|| Error::Auth("token refresh returned no access token".to_string()))?;

        Ok(Token {
            access_token: access_token.to_string(),
            // refresh responses may omit the refresh token, keep the old one then
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or(self.token.refresh_token.as_str())
                .to_string(),
            scope: json["scope"].as_str().unwrap_or_default().to_string(),
            expires_in: json["expires_in"].as_u64().unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}
