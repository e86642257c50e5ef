// src/clients/auth_client.rs

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    common::error::AppError,
    models::auth::{AuthorizeRequest, AuthorizeResponse},
};

// Fronteira com a API de autorização externa
#[async_trait]
pub trait AuthorizationApi: Send + Sync {
    async fn authorize(&self, token_type: &str) -> Result<AuthorizeResponse, AppError>;
}

#[derive(Clone)]
pub struct HttpAuthorizationApi {
    client: Client,
    url: String,
}

impl HttpAuthorizationApi {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }
}

#[async_trait]
impl AuthorizationApi for HttpAuthorizationApi {
    async fn authorize(&self, token_type: &str) -> Result<AuthorizeResponse, AppError> {
        let response = self.client
            .post(&self.url)
            .json(&AuthorizeRequest { token_type })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("🔥 Falha de rede ao pedir token: {}", e);
                AppError::LoginFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("API de autorização respondeu {}", status);
            return Err(AppError::LoginFailed);
        }

        // Corpo que não é JSON conta como falha de login, não como "sem token"
        response.json::<AuthorizeResponse>().await.map_err(|e| {
            tracing::error!("🔥 Resposta de autorização inválida: {}", e);
            AppError::LoginFailed
        })
    }
}
