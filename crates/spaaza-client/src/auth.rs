//! Per-call authentication contexts.

/// Credentials attached to a single request as headers.
///
/// Exactly one shape is active per call. A bearer token becomes an
/// `Authorization: Bearer <token>` header; session credentials become the
/// `X-Spaaza-Session-*` headers, one per present field.
#[derive(Debug, Clone)]
pub enum Auth {
    /// Token-based auth, sent as `Authorization: Bearer <token>`.
    Bearer(String),
    /// Session-based auth, sent as `X-Spaaza-Session-*` headers.
    Session(SessionAuth),
}

impl From<SessionAuth> for Auth {
    fn from(session: SessionAuth) -> Self {
        Auth::Session(session)
    }
}

impl From<String> for Auth {
    fn from(token: String) -> Self {
        Auth::Bearer(token)
    }
}

impl From<&str> for Auth {
    fn from(token: &str) -> Self {
        Auth::Bearer(token.to_string())
    }
}

/// Session credential fields. Absent fields emit no header.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    /// Session key, sent as `X-Spaaza-Session-Key`.
    pub session_key: Option<String>,
    /// User id, stringified into `X-Spaaza-Session-User-Id`.
    pub user_id: Option<u64>,
    /// Username, sent as `X-Spaaza-Session-Username`.
    pub username: Option<String>,
    /// Chain id, sent as `X-Spaaza-Session-Chain-Id`.
    pub chain_id: Option<String>,
}

impl SessionAuth {
    /// Create an empty session context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session key.
    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    /// Set the user id.
    pub fn user_id(mut self, id: u64) -> Self {
        self.user_id = Some(id);
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the chain id.
    pub fn chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }
}
