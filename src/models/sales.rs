// src/models/sales.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::dashboard::{FilterSet, SortSpec};

/// Tamanho fixo da página na API de vendas (não vem declarado na resposta).
pub const PAGE_SIZE: usize = 50;

// --- 1. Uma venda, como vem da API ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesRow {
    pub id: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date: DateTime<Utc>,
    pub customer_email: String,
    pub customer_phone: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalSales {
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub total_sale: Option<Decimal>,
    #[serde(default)]
    pub day: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesResults {
    #[serde(rename = "Sales", default)]
    pub sales: Vec<SalesRow>,
    #[serde(rename = "TotalSales", default)]
    pub total_sales: Option<TotalSales>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

// Envelope completo de GET /sales
#[derive(Debug, Clone, Deserialize)]
pub struct SalesListResponse {
    pub results: SalesResults,
    #[serde(default)]
    pub pagination: Pagination,
}

// --- 2. Série do gráfico (derivada, nunca buscada) ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

/// Arredonda para centavos, com meio centavo para longe do zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Um ponto por valor distinto de `date` na página, soma dos preços, em ordem
/// cronológica.
pub fn build_chart_series(rows: &[SalesRow]) -> Vec<ChartPoint> {
    let mut totals: BTreeMap<DateTime<Utc>, Decimal> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.date).or_insert(Decimal::ZERO) += row.price;
    }

    totals
        .into_iter()
        .map(|(date, total)| ChartPoint { date, total: round_money(total) })
        .collect()
}

// --- 3. Query string de GET /sales ---
// Valores ausentes vão como string vazia; a API espera todas as chaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub start_date: String,
    pub end_date: String,
    pub price_min: String,
    pub email: String,
    pub phone: String,
    pub sort_by: String,
    pub sort_order: String,
    pub after: String,
    pub before: String,
}

impl SalesQuery {
    pub fn new(
        filters: &FilterSet,
        sort: &SortSpec,
        after: Option<&str>,
        before: Option<&str>,
    ) -> Self {
        Self {
            start_date: filters.start_date.format("%Y-%m-%d").to_string(),
            end_date: filters.end_date.format("%Y-%m-%d").to_string(),
            price_min: filters.min_price.map(|p| p.normalize().to_string()).unwrap_or_default(),
            email: filters.email.clone().unwrap_or_default(),
            phone: filters.phone.clone().unwrap_or_default(),
            sort_by: sort.field.as_str().to_string(),
            sort_order: sort.order.as_str().to_string(),
            after: after.unwrap_or_default().to_string(),
            before: before.unwrap_or_default().to_string(),
        }
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid sale timestamp: {raw}")))
    }
}
