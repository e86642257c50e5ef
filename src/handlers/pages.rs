// src/handlers/pages.rs

use askama::Template;
use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::dashboard::dashboard_instance,
    middleware::session::Session,
    models::{
        dashboard::{DashboardView, SortField, SortOrder},
        sales::round_money,
    },
};

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

// Uma linha da tabela, já formatada
pub struct TableRow {
    pub number: u32,
    pub date: String,
    pub email: String,
    pub phone: String,
    pub price: String,
}

// Uma barra do gráfico: largura relativa ao maior total da página
pub struct ChartBar {
    pub date: String,
    pub time: String,
    pub total: String,
    pub width: u32,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub start_date: String,
    pub end_date: String,
    pub min_price: String,
    pub email: String,
    pub phone: String,
    pub date_arrow: &'static str,
    pub price_arrow: &'static str,
    pub rows: Vec<TableRow>,
    pub chart: Vec<ChartBar>,
    pub total_sales: Option<String>,
    pub page: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub can_go_next: bool,
    pub can_go_prev: bool,
}

fn arrow(view: &DashboardView, field: SortField) -> &'static str {
    match (view.sort.field == field, view.sort.order) {
        (true, SortOrder::Asc) => "▲",
        (true, SortOrder::Desc) => "▼",
        (false, _) => "△",
    }
}

fn money(value: Decimal) -> String {
    format!("${:.2}", round_money(value))
}

impl From<&DashboardView> for DashboardTemplate {
    fn from(view: &DashboardView) -> Self {
        let rows = view
            .rows
            .iter()
            .zip(view.first_row_number..)
            .map(|(row, number)| TableRow {
                number,
                date: row.date.format("%Y-%m-%d").to_string(),
                email: row.customer_email.clone(),
                phone: row.customer_phone.clone(),
                price: money(row.price),
            })
            .collect();

        let max = view
            .chart
            .iter()
            .map(|point| point.total)
            .max()
            .unwrap_or(Decimal::ZERO);
        let chart = view
            .chart
            .iter()
            .map(|point| ChartBar {
                date: point.date.format("%Y-%m-%d %H:%M").to_string(),
                time: point.date.format("%H:%M").to_string(),
                total: money(point.total),
                width: if max > Decimal::ZERO {
                    (point.total * Decimal::ONE_HUNDRED / max).round().to_u32().unwrap_or(0)
                } else {
                    0
                },
            })
            .collect();

        let total_sales = view.total_sales.as_ref().and_then(|totals| {
            totals.total_sale.map(|total| match &totals.day {
                Some(day) => format!("{} on {}", money(total), day),
                None => money(total),
            })
        });

        Self {
            start_date: view.filters.start_date.format("%Y-%m-%d").to_string(),
            end_date: view.filters.end_date.format("%Y-%m-%d").to_string(),
            min_price: view.filters.min_price.map(|p| p.normalize().to_string()).unwrap_or_default(),
            email: view.filters.email.clone().unwrap_or_default(),
            phone: view.filters.phone.clone().unwrap_or_default(),
            date_arrow: arrow(view, SortField::Date),
            price_arrow: arrow(view, SortField::Price),
            rows,
            chart,
            total_sales,
            page: view.page,
            loading: view.loading,
            error: view.error.clone(),
            can_go_next: view.can_go_next,
            can_go_prev: view.can_go_prev,
        }
    }
}

// GET /
pub async fn index() -> Result<Html<String>, AppError> {
    render(&IndexTemplate)
}

// GET /login
pub async fn login_page() -> Result<Html<String>, AppError> {
    render(&LoginTemplate { error: None })
}

// GET /dashboard
pub async fn dashboard_page(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, id) = dashboard_instance(jar, app_state.cookie_secure);
    let view = app_state.dashboard_service.view(id, session).await;
    let page = render(&DashboardTemplate::from(&view))?;
    Ok((jar, page))
}
