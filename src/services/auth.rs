// src/services/auth.rs

use std::sync::Arc;

use crate::{clients::AuthorizationApi, common::error::AppError};

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AuthorizationApi>,
    token_type: String,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthorizationApi>, token_type: impl Into<String>) -> Self {
        Self { api, token_type: token_type.into() }
    }

    /// Troca o identificador fixo do cliente por um token de sessão.
    /// Sem nova tentativa em caso de falha.
    pub async fn login(&self) -> Result<String, AppError> {
        let response = self.api.authorize(&self.token_type).await?;

        match response.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                tracing::info!("✅ Token de sessão emitido");
                Ok(token)
            }
            None => {
                tracing::warn!("API de autorização respondeu sem token");
                Err(AppError::TokenNotFound)
            }
        }
    }
}
