// src/handlers/auth.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::pages::{render, LoginTemplate},
    middleware::session::AUTH_COOKIE,
    models::auth::LoginResponse,
};

// 24 horas
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24;

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::seconds(SESSION_MAX_AGE_SECS))
        .build()
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    responses(
        (status = 200, description = "Token emitido e gravado no cookie auth_token", body = LoginResponse),
        (status = 401, description = "A API de autorização não devolveu token"),
        (status = 500, description = "Falha ao falar com a API de autorização")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let token = app_state.auth_service.login().await?;
    let jar = jar.add(session_cookie(token, app_state.cookie_secure));

    Ok((jar, Json(LoginResponse { success: true })))
}

// POST /login (formulário HTML da página de login)
pub async fn login_form(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match app_state.auth_service.login().await {
        Ok(token) => {
            let jar = jar.add(session_cookie(token, app_state.cookie_secure));
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(e) => {
            let status = match e {
                AppError::TokenNotFound => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let page = render(&LoginTemplate {
                error: Some("Login failed. Please try again.".to_string()),
            })?;
            Ok((status, page).into_response())
        }
    }
}
