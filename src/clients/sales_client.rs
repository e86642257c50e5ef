// src/clients/sales_client.rs

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderName, CACHE_CONTROL},
    Client,
};

use crate::{
    common::error::AppError,
    models::sales::{SalesListResponse, SalesQuery},
};

// Fronteira com a API de listagem de vendas
#[async_trait]
pub trait SalesApi: Send + Sync {
    async fn list_sales(&self, token: &str, query: &SalesQuery) -> Result<SalesListResponse, AppError>;
}

#[derive(Clone)]
pub struct HttpSalesApi {
    client: Client,
    url: String,
    token_header: HeaderName,
}

impl HttpSalesApi {
    pub fn new(client: Client, url: impl Into<String>, token_header: &str) -> anyhow::Result<Self> {
        let token_header = HeaderName::from_bytes(token_header.as_bytes())
            .with_context(|| format!("Nome de cabeçalho inválido: {token_header}"))?;

        Ok(Self { client, url: url.into(), token_header })
    }
}

#[async_trait]
impl SalesApi for HttpSalesApi {
    async fn list_sales(&self, token: &str, query: &SalesQuery) -> Result<SalesListResponse, AppError> {
        let response = self.client
            .get(&self.url)
            .query(query)
            .header(self.token_header.clone(), token)
            // Cada pedido tem de refletir os filtros atuais
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchFailed { status: status.as_u16() });
        }

        let body = response.json::<SalesListResponse>().await?;
        tracing::info!(
            "GET vendas {} -> {} linhas (sortBy={}, sortOrder={})",
            status,
            body.results.sales.len(),
            query.sort_by,
            query.sort_order,
        );
        Ok(body)
    }
}
