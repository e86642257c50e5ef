// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Corpo enviado para a API de autorização
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest<'a> {
    pub token_type: &'a str,
}

// Resposta da API de autorização. O token pode não vir.
#[derive(Debug, Default, Deserialize)]
pub struct AuthorizeResponse {
    #[serde(default)]
    pub token: Option<String>,
}

// Resposta do nosso endpoint /api/auth/login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
}
