// src/clients/fake.rs
// Implementações em memória das APIs externas, para os testes.

use std::{
    collections::VecDeque,
    sync::Mutex,
};

use async_trait::async_trait;
use axum::Router;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::{net::TcpListener, sync::oneshot};

use crate::{
    clients::{AuthorizationApi, SalesApi},
    common::error::AppError,
    models::{
        auth::AuthorizeResponse,
        sales::{Pagination, SalesListResponse, SalesQuery, SalesResults, SalesRow},
    },
};

/// Página com `count` vendas de R$ 10,00 em 2025-01-01.
pub fn sample_page(count: usize, after: Option<&str>, before: Option<&str>) -> SalesListResponse {
    let sales = (0..count)
        .map(|i| SalesRow {
            id: format!("sale-{i}"),
            date: Utc.with_ymd_and_hms(2025, 1, 1, (i % 24) as u32, 0, 0).unwrap(),
            customer_email: format!("customer{i}@example.com"),
            customer_phone: format!("555-{i:04}"),
            price: Decimal::new(1000, 2),
        })
        .collect();

    SalesListResponse {
        results: SalesResults { sales, total_sales: None },
        pagination: Pagination {
            after: after.map(String::from),
            before: before.map(String::from),
        },
    }
}

enum Scripted {
    Page(SalesListResponse),
    Status(u16),
    Gated(oneshot::Receiver<()>, SalesListResponse),
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub token: String,
    pub query: SalesQuery,
}

/// Responde na ordem em que as respostas foram enfileiradas.
/// Fila vazia = página vazia.
#[derive(Default)]
pub struct FakeSalesApi {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeSalesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: SalesListResponse) {
        self.script.lock().unwrap().push_back(Scripted::Page(page));
    }

    pub fn push_status(&self, status: u16) {
        self.script.lock().unwrap().push_back(Scripted::Status(status));
    }

    /// A resposta só sai depois de o `Sender` devolvido ser acionado.
    pub fn push_gated(&self, page: SalesListResponse) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted::Gated(rx, page));
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SalesApi for FakeSalesApi {
    async fn list_sales(&self, token: &str, query: &SalesQuery) -> Result<SalesListResponse, AppError> {
        self.calls.lock().unwrap().push(RecordedCall {
            token: token.to_string(),
            query: query.clone(),
        });

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Page(page)) => Ok(page),
            Some(Scripted::Status(status)) => Err(AppError::FetchFailed { status }),
            Some(Scripted::Gated(gate, page)) => {
                let _ = gate.await;
                Ok(page)
            }
            None => Ok(sample_page(0, None, None)),
        }
    }
}

/// Devolve sempre o mesmo token (ou nenhum).
pub struct FakeAuthorizationApi {
    pub token: Option<String>,
    pub fail: bool,
}

#[async_trait]
impl AuthorizationApi for FakeAuthorizationApi {
    async fn authorize(&self, _token_type: &str) -> Result<AuthorizeResponse, AppError> {
        if self.fail {
            return Err(AppError::LoginFailed);
        }
        Ok(AuthorizeResponse { token: self.token.clone() })
    }
}

/// Sobe o router numa porta livre de 127.0.0.1 e devolve a URL base.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Cliente sem proxy, para falar só com o servidor local.
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
