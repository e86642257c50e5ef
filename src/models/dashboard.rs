// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    models::sales::{ChartPoint, SalesRow, TotalSales},
};

// --- 1. Filtros ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,

    #[serde(default)]
    #[validate(length(max = 254, message = "The email filter is too long."))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 254, message = "The phone filter is too long."))]
    pub phone: Option<String>,
}

impl FilterSet {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            min_price: None,
            email: None,
            phone: None,
        }
    }

    // Campos de texto em branco equivalem a "sem filtro"
    pub fn normalized(mut self) -> Self {
        self.email = non_blank(self.email);
        self.phone = non_blank(self.phone);
        self
    }

    fn validate_consistency(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.min_price.is_some_and(|price| price < Decimal::ZERO) {
            let mut err = ValidationError::new("range");
            err.add_param("min".into(), &0.0);
            err.message = Some("The minimum price cannot be negative.".into());
            errors.add("minPrice", err);
        }

        if self.start_date > self.end_date {
            let mut err = ValidationError::new("DateRange");
            err.message = Some("The start date must not be after the end date.".into());
            errors.add("startDate", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validação completa: atributos do `validator` + regras entre campos.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        self.validate_consistency()?;
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// --- 2. Ordenação ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Price,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            order: SortOrder::Asc,
        }
    }
}

impl SortSpec {
    /// Mesmo campo inverte a ordem; campo novo volta para ascendente.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self { field, order: self.order.flipped() }
        } else {
            Self { field, order: SortOrder::Asc }
        }
    }
}

// --- 3. Snapshot do dashboard (o que a página renderiza) ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub page: u32,
    pub first_row_number: u32,
    pub rows: Vec<SalesRow>,
    pub chart: Vec<ChartPoint>,
    pub total_sales: Option<TotalSales>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_next_page: bool,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    pub after_token: Option<String>,
    pub before_token: Option<String>,
}
