// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{cache::no_store, session::session_gate},
};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas (páginas)
    let public_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/login", get(handlers::pages::login_page).post(handlers::auth::login_form));

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    // A página do dashboard, protegida pelo middleware de sessão
    let dashboard_page = Router::new()
        .route("/dashboard", get(handlers::pages::dashboard_page))
        .layer(axum_middleware::from_fn(session_gate));

    let dashboard_api = Router::new()
        .route("/", get(handlers::dashboard::get_dashboard))
        .route("/filters", put(handlers::dashboard::update_filters))
        .route("/sort/{field}", post(handlers::dashboard::toggle_sort))
        .route("/next", post(handlers::dashboard::next_page))
        .route("/prev", post(handlers::dashboard::prev_page))
        .layer(axum_middleware::map_response(no_store))
        .layer(axum_middleware::from_fn(session_gate));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(public_routes)
        .merge(dashboard_page)
        .nest("/api/auth", auth_routes)
        .nest("/api/dashboard", dashboard_api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
