// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // A API de autorização respondeu, mas sem o campo `token`
    #[error("Token not found")]
    TokenNotFound,

    // Falha de rede ou status não-2xx na API de autorização
    #[error("Login failed")]
    LoginFailed,

    #[error("Sessão ausente")]
    MissingSession,

    // Status não-2xx na API de vendas
    #[error("HTTP error! status: {status}")]
    FetchFailed { status: u16 },

    #[error("Erro ao chamar a API externa: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Erro ao renderizar template: {0}")]
    Template(#[from] askama::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::TokenNotFound => (StatusCode::UNAUTHORIZED, "Token not found"),
            AppError::LoginFailed => (StatusCode::INTERNAL_SERVER_ERROR, "Login failed"),
            AppError::MissingSession => (StatusCode::UNAUTHORIZED, "Missing session."),
            ref e @ (AppError::FetchFailed { .. } | AppError::Upstream(_)) => {
                tracing::warn!("Falha na API de vendas: {}", e);
                (StatusCode::BAD_GATEWAY, "Failed to fetch sales data. Please try again.")
            }

            // Todos os outros erros (Template, InternalServerError) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
