use crate::errors::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub display_name: Option<String>,
}

pub trait SessionProvider: Send + Sync {
    fn current_user(&self, token: &str) -> Option<SessionUser>;
}

/// Fixed token table, loaded from configuration.
#[derive(Debug, Default)]
pub struct TokenSessions {
    users: HashMap<String, SessionUser>,
}

impl TokenSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `token=user[:Display Name]` entries separated by commas.
    pub fn parse(entries: &str) -> Self {
        let mut sessions = Self::new();
        for entry in entries.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((token, user)) = entry.split_once('=') else {
                warn!("skipping session entry without '=': {entry:?}");
                continue;
            };
            let (id, display_name) = match user.split_once(':') {
                Some((id, name)) => (id.trim(), Some(name.trim().to_string())),
                None => (user.trim(), None),
            };
            if token.trim().is_empty() || id.is_empty() {
                warn!("skipping session entry with empty token or user: {entry:?}");
                continue;
            }
            sessions.insert(
                token.trim(),
                SessionUser {
                    id: id.to_string(),
                    display_name: display_name.filter(|name| !name.is_empty()),
                },
            );
        }
        sessions
    }

    pub fn insert(&mut self, token: impl Into<String>, user: SessionUser) {
        self.users.insert(token.into(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl SessionProvider for TokenSessions {
    fn current_user(&self, token: &str) -> Option<SessionUser> {
        self.users.get(token).cloned()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

fn resolve(parts: &Parts, state: &AppState) -> Option<SessionUser> {
    bearer_token(&parts.headers).and_then(|token| state.sessions.current_user(token))
}

/// Signed-in user; rejects the request with 401 otherwise.
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve(parts, state)
            .map(CurrentUser)
            .ok_or_else(|| AppError::unauthorized("sign in to vote"))
    }
}

/// Signed-in user when there is one. Unknown tokens read as anonymous.
pub struct MaybeUser(pub Option<SessionUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve(parts, state)))
    }
}
