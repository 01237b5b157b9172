use anyhow::Result;
use secrecy::SecretString;

use crate::config::{ResolvedConfig, SourceKind};
use crate::session::{SessionGate, SessionState, TokenStore};

fn state_name(state: SessionState) -> &'static str {
    match state {
        SessionState::Unauthenticated => "unauthenticated",
        SessionState::Prompting => "token_missing",
        SessionState::Authenticated => "authenticated",
    }
}

/// Report the session state of `store`, storing `new_token` first if given.
pub async fn token_output_with(
    store: &dyn TokenStore,
    new_token: Option<String>,
) -> Result<serde_json::Value> {
    let mut gate = SessionGate::new();
    let state = match new_token {
        Some(token) => gate.submit(store, SecretString::from(token)).await?,
        None => gate.check(store).await?,
    };
    Ok(serde_json::json!({
        "state": state_name(state),
        "can_fetch": gate.can_fetch(),
    }))
}

pub async fn token_output(
    config: &ResolvedConfig,
    new_token: Option<String>,
) -> Result<serde_json::Value> {
    match config.source {
        SourceKind::File => Ok(serde_json::json!({
            "state": "not_required",
            "can_fetch": true,
        })),
        SourceKind::Http => http_token_output(config, new_token).await,
    }
}

#[cfg(feature = "http")]
async fn http_token_output(
    config: &ResolvedConfig,
    new_token: Option<String>,
) -> Result<serde_json::Value> {
    let source = crate::source::HttpSource::new(config.base_url.clone());
    token_output_with(&source, new_token).await
}

#[cfg(not(feature = "http"))]
async fn http_token_output(
    _config: &ResolvedConfig,
    _new_token: Option<String>,
) -> Result<serde_json::Value> {
    anyhow::bail!("HTTP source requested but divbook was built without the `http` feature")
}
