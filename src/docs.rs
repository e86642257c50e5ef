// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::update_filters,
        handlers::dashboard::toggle_sort,
        handlers::dashboard::next_page,
        handlers::dashboard::prev_page,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginResponse,

            // --- Dashboard ---
            models::dashboard::FilterSet,
            models::dashboard::SortField,
            models::dashboard::SortOrder,
            models::dashboard::SortSpec,
            models::dashboard::DashboardView,

            // --- Sales ---
            models::sales::SalesRow,
            models::sales::TotalSales,
            models::sales::ChartPoint,
        )
    ),
    tags(
        (name = "Auth", description = "Troca do identificador do cliente por um token de sessão"),
        (name = "Dashboard", description = "Filtros, ordenação e paginação da listagem de vendas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("auth_token"))),
        );
    }
}
