//! Token presence check gating snapshot fetches.
//!
//! The gate only records whether the backend holds a token. It never
//! validates credentials; the backend does that on its own requests.
//!
//! ```text
//! Unauthenticated --observe(Missing)--> Prompting --submit--> Authenticated
//!        \--------------observe(Found)---------------------------/
//! ```

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

/// Outcome of asking the backend for its stored token.
#[derive(Debug)]
pub enum TokenLookup {
    Found(SecretString),
    Missing,
}

/// Where the brokerage token lives.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns `Ok(TokenLookup::Missing)` when no token is stored and `Err`
    /// only when the store itself could not be reached.
    async fn get_token(&self) -> Result<TokenLookup>;

    async fn set_token(&self, token: SecretString) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// No token stored; the user is asked for one.
    Prompting,
    Authenticated,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("token must not be empty")]
    EmptyToken,
    #[error("snapshot fetch not permitted in state {0:?}")]
    FetchNotPermitted(SessionState),
}

#[derive(Debug, Default)]
pub struct SessionGate {
    state: SessionState,
    token: Option<SecretString>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply the result of a token lookup.
    pub fn observe(&mut self, lookup: TokenLookup) -> SessionState {
        match lookup {
            TokenLookup::Found(token) => {
                self.token = Some(token);
                self.state = SessionState::Authenticated;
            }
            TokenLookup::Missing => {
                self.token = None;
                self.state = SessionState::Prompting;
            }
        }
        debug!(state = ?self.state, "session token observed");
        self.state
    }

    /// Accept a token entered by the user.
    pub fn submit_token(&mut self, token: SecretString) -> Result<SessionState, SessionError> {
        if token.expose_secret().trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.token = Some(token);
        self.state = SessionState::Authenticated;
        info!("session token accepted");
        Ok(self.state)
    }

    /// Forget the token, e.g. after the backend rejected it.
    pub fn invalidate(&mut self) {
        self.token = None;
        self.state = SessionState::Unauthenticated;
        debug!("session invalidated");
    }

    pub fn can_fetch(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn ensure_can_fetch(&self) -> Result<(), SessionError> {
        if self.can_fetch() {
            Ok(())
        } else {
            Err(SessionError::FetchNotPermitted(self.state))
        }
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Ask `store` for its token and apply the answer.
    pub async fn check(&mut self, store: &dyn TokenStore) -> Result<SessionState> {
        let lookup = store.get_token().await?;
        Ok(self.observe(lookup))
    }

    /// Persist `token` in `store`, then accept it.
    pub async fn submit(
        &mut self,
        store: &dyn TokenStore,
        token: SecretString,
    ) -> Result<SessionState> {
        if token.expose_secret().trim().is_empty() {
            return Err(SessionError::EmptyToken.into());
        }
        store
            .set_token(SecretString::from(token.expose_secret().to_string()))
            .await?;
        Ok(self.submit_token(token)?)
    }
}

/// Token store held in memory.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get_token(&self) -> Result<TokenLookup> {
        let token = self.token.lock().expect("token lock poisoned");
        Ok(match token.as_ref() {
            Some(token) => {
                TokenLookup::Found(SecretString::from(token.expose_secret().to_string()))
            }
            None => TokenLookup::Missing,
        })
    }

    async fn set_token(&self, token: SecretString) -> Result<()> {
        let mut slot = self.token.lock().expect("token lock poisoned");
        *slot = Some(token);
        Ok(())
    }
}
