//! # OAuth Module
//!
//! Authorization Code flow with PKCE against the Spotify accounts service.
//!
//! 1. A random code verifier is generated and its SHA256 challenge derived.
//! 2. A local callback server is started and the authorization URL opened
//!    in the browser.
//! 3. The callback exchanges the code and verifier for a token.
//! 4. The token is persisted and later refreshed by [`TokenManager`].

mod server;
mod token;

use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Client;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::{sync::Mutex, time::Instant};

use crate::{
    Error, Result,
    config::Settings,
    types::{PkceToken, Token},
    warning,
};

pub use server::{AuthState, start_callback_server};
pub use token::TokenManager;

/// How long to wait for the browser to hit the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the URL the user is sent to for granting access.
pub fn authorization_url(settings: &Settings, code_challenge: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        auth_url = settings.auth_url,
        client_id = settings.client_id,
        redirect_uri = settings.redirect_uri,
        code_challenge = code_challenge,
        scope = settings.scope.replace(' ', "%20"),
    )
}

/// Runs the full PKCE flow and persists the resulting token.
pub async fn authorize(settings: &Settings) -> Result<TokenManager> {
    let code_verifier = generate_code_verifier();
    let code_challenge = generate_code_challenge(&code_verifier);

    let state = Arc::new(AuthState {
        pkce: Mutex::new(Some(PkceToken {
            code_verifier,
            token: None,
        })),
        token_url: settings.token_url.clone(),
        client_id: settings.client_id.clone(),
        redirect_uri: settings.redirect_uri.clone(),
    });

    let server = start_callback_server(&settings.server_address, Arc::clone(&state)).await?;

    let auth_url = authorization_url(settings, &code_challenge);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(&state).await;
    server.abort();

    let token = token.ok_or_else(|| Error::Auth("authorization timed out".to_string()))?;
    let manager = TokenManager::new(
        token,
        settings.token_path.clone(),
        settings.token_url.clone(),
        settings.client_id.clone(),
    );
    manager.persist().await?;
    Ok(manager)
}

async fn wait_for_token(state: &AuthState) -> Option<Token> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < CALLBACK_TIMEOUT {
        {
            let lock = state.pkce.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
                pb.finish_and_clear();
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

/// Exchanges an authorization code and its verifier for a token.
pub async fn exchange_code_pkce(state: &AuthState, code: &str, verifier: &str) -> Result<Token> {
    let res = Client::new()
        .post(&state.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", state.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", state.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    let field = |name: &str| {
        json[name]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Auth(format!("token response is missing '{}'", name)))
    };

    Ok(Token {
        access_token: field("access_token")?,
        refresh_token: field("refresh_token")?,
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
