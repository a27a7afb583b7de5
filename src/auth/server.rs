use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    extract::Query,
    response::{Html, Json},
    routing::get,
};
use serde_json::{Value, json};
use tokio::{sync::Mutex, task::JoinHandle};

use super::exchange_code_pkce;
use crate::{Error, Result, types::PkceToken, warning};

/// State shared between the auth flow and the callback handler.
pub struct AuthState {
    pub pkce: Mutex<Option<PkceToken>>,
    pub token_url: String,
    pub client_id: String,
    pub redirect_uri: String,
}

/// Binds the local callback server and serves it in the background.
pub async fn start_callback_server(
    address: &str,
    state: Arc<AuthState>,
) -> Result<JoinHandle<()>> {
    let app = Router::new()
        .route("/health", get(health))
        .route("/callback", get(callback).layer(Extension(state)));

    let addr = SocketAddr::from_str(address)
        .map_err(|e| Error::Config(format!("invalid SERVER_ADDRESS '{}': {}", address, e)))?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut pkce = state.pkce.lock().await;
    let Some(pkce_state) = pkce.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    match exchange_code_pkce(&state, code, &pkce_state.code_verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
