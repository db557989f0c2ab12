//! Per-process auth state shared by every backend request.

use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::sync::RwLock;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Query parameter carrying the API key.
pub const API_KEY_QUERY_PARAM: &str = "api_key_header_value";
/// Login response keys probed for a bearer token, highest priority first.
pub const TOKEN_KEYS: [&str; 3] = ["access_token", "token", "accessToken"];

/// Connection and auth state for one backend.
///
/// The bearer token is a last-write-wins slot: it is replaced on every
/// successful login that yields a token and never expires on its own.
#[derive(Debug)]
pub struct Session {
    base_url: String,
    api_key: Option<String>,
    bearer_token: RwLock<Option<String>>,
}

impl Session {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            bearer_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bearer_token(&self) -> Option<String> {
        match self.bearer_token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_bearer_token(&self, token: String) {
        let mut guard = match self.bearer_token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(token);
    }

    /// Attach API key (header and query) and bearer token to a request.
    pub fn authorize(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(key) = &self.api_key {
            builder = builder
                .header(API_KEY_HEADER, key)
                .query(&[(API_KEY_QUERY_PARAM, key)]);
        }
        if let Some(token) = self.bearer_token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    /// Store the token found in a login payload, if any. Returns whether the
    /// session changed.
    pub fn absorb_login(&self, payload: &Value) -> bool {
        match extract_token(payload) {
            Some(token) => {
                self.set_bearer_token(token);
                true
            }
            None => false,
        }
    }
}

/// First non-empty string under one of [`TOKEN_KEYS`], in priority order.
pub fn extract_token(payload: &Value) -> Option<String> {
    let map = payload.as_object()?;
    let value = TOKEN_KEYS.iter().find_map(|key| map.get(*key))?;
    value.as_str().filter(|t| !t.is_empty()).map(str::to_string)
}
