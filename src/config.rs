// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;

use crate::{
    clients::{AuthorizationApi, HttpAuthorizationApi, HttpSalesApi, SalesApi},
    models::dashboard::FilterSet,
    services::{auth::AuthService, dashboard_service::DashboardService},
};

const DEFAULT_AUTH_API_URL: &str = "https://autobizz-425913.uc.r.appspot.com/getAuthorize";
const DEFAULT_SALES_API_URL: &str = "https://autobizz-425913.uc.r.appspot.com/sales";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub auth_api_url: String,
    pub auth_token_type: String,
    pub sales_api_url: String,
    pub sales_token_header: String,
    pub cookie_secure: bool,
    pub http_timeout: Option<Duration>,
    pub default_start_date: NaiveDate,
    pub default_end_date: NaiveDate,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Todas as variáveis são opcionais; os padrões apontam para a API real.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => raw.parse::<bool>()
                .with_context(|| format!("COOKIE_SECURE inválido: {raw}"))?,
            None => true,
        };

        let http_timeout = lookup("HTTP_TIMEOUT_SECS")
            .map(|raw| raw.parse::<u64>().with_context(|| format!("HTTP_TIMEOUT_SECS inválido: {raw}")))
            .transpose()?
            .map(Duration::from_secs);

        let parse_date = |key: &str| -> anyhow::Result<NaiveDate> {
            let raw = var(key, "2025-01-01");
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .with_context(|| format!("{key} deve estar no formato AAAA-MM-DD: {raw}"))
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR", "0.0.0.0:3000"),
            auth_api_url: var("AUTH_API_URL", DEFAULT_AUTH_API_URL),
            auth_token_type: var("AUTH_TOKEN_TYPE", "frontEndTest"),
            sales_api_url: var("SALES_API_URL", DEFAULT_SALES_API_URL),
            sales_token_header: var("SALES_TOKEN_HEADER", "X-AUTH-TOKEN"),
            cookie_secure,
            http_timeout,
            default_start_date: parse_date("DEFAULT_START_DATE")?,
            default_end_date: parse_date("DEFAULT_END_DATE")?,
        })
    }

    pub fn default_filters(&self) -> FilterSet {
        FilterSet::new(self.default_start_date, self.default_end_date)
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Falha ao criar o cliente HTTP")?;

        let auth_api = Arc::new(HttpAuthorizationApi::new(client.clone(), &config.auth_api_url));
        let sales_api = Arc::new(HttpSalesApi::new(client, &config.sales_api_url, &config.sales_token_header)?);

        tracing::info!("✅ Clientes HTTP prontos (autorização: {}, vendas: {})", config.auth_api_url, config.sales_api_url);

        Ok(Self::with_clients(auth_api, sales_api, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_clients(
        auth_api: Arc<dyn AuthorizationApi>,
        sales_api: Arc<dyn SalesApi>,
        config: &Config,
    ) -> Self {
        Self {
            auth_service: AuthService::new(auth_api, config.auth_token_type.clone()),
            dashboard_service: DashboardService::new(sales_api, config.default_filters()),
            cookie_secure: config.cookie_secure,
        }
    }
}
