// src/middleware/session.rs

use std::fmt;

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::common::error::AppError;

pub const AUTH_COOKIE: &str = "auth_token";

// Credencial emitida pela API de autorização, lida do cookie.
// Passada explicitamente para quem precisa dela (sem estado global).
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn from_cookies(jar: &CookieJar) -> Option<Self> {
        jar.get(AUTH_COOKIE)
            .map(|cookie| cookie.value().trim())
            .filter(|value| !value.is_empty())
            .map(Session::new)
    }
}

// Nunca imprime o token
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

// O middleware em si: sem cookie, vai para /login antes de qualquer handler.
// Um token expirado passa; só a API de vendas sabe que ele expirou.
pub async fn session_gate(jar: CookieJar, mut request: Request, next: Next) -> Response {
    match Session::from_cookies(&jar) {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            tracing::debug!("Sem sessão para {}, redirecionando para /login", request.uri().path());
            Redirect::to("/login").into_response()
        }
    }
}

// Extrator para obter a sessão diretamente nos handlers
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AppError::MissingSession)
    }
}
