// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::auth::SESSION_MAX_AGE_SECS,
    middleware::session::Session,
    models::dashboard::{DashboardView, FilterSet, SortField},
};

pub const DASHBOARD_COOKIE: &str = "dashboard_id";

// Cada navegador tem a sua instância do dashboard, identificada por cookie.
pub(crate) fn dashboard_instance(jar: CookieJar, secure: bool) -> (CookieJar, Uuid) {
    let existing = jar
        .get(DASHBOARD_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

    match existing {
        Some(id) => (jar, id),
        None => {
            let id = Uuid::new_v4();
            let cookie = Cookie::build((DASHBOARD_COOKIE, id.to_string()))
                .http_only(true)
                .secure(secure)
                .path("/")
                .max_age(time::Duration::seconds(SESSION_MAX_AGE_SECS));
            (jar.add(cookie), id)
        }
    }
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Estado atual do dashboard (faz a primeira busca numa instância nova)", body = DashboardView),
        (status = 303, description = "Sem cookie de sessão, redireciona para /login")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, Json<DashboardView>) {
    let (jar, id) = dashboard_instance(jar, app_state.cookie_secure);
    let view = app_state.dashboard_service.view(id, session).await;
    (jar, Json(view))
}

// PUT /api/dashboard/filters
#[utoipa::path(
    put,
    path = "/api/dashboard/filters",
    tag = "Dashboard",
    request_body = FilterSet,
    responses(
        (status = 200, description = "Filtros aplicados; paginação volta para a página 1", body = DashboardView),
        (status = 400, description = "Filtros inválidos")
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn update_filters(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Json(payload): Json<FilterSet>,
) -> Result<(CookieJar, Json<DashboardView>), AppError> {
    let (jar, id) = dashboard_instance(jar, app_state.cookie_secure);
    let view = app_state
        .dashboard_service
        .update_filters(id, session, payload)
        .await?;
    Ok((jar, Json(view)))
}

// POST /api/dashboard/sort/{field}
#[utoipa::path(
    post,
    path = "/api/dashboard/sort/{field}",
    tag = "Dashboard",
    params(
        ("field" = SortField, Path, description = "date ou price")
    ),
    responses(
        (status = 200, description = "Ordenação alternada e dados buscados de novo", body = DashboardView)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn toggle_sort(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(field): Path<SortField>,
) -> (CookieJar, Json<DashboardView>) {
    let (jar, id) = dashboard_instance(jar, app_state.cookie_secure);
    let view = app_state.dashboard_service.toggle_sort(id, session, field).await;
    (jar, Json(view))
}

// POST /api/dashboard/next
#[utoipa::path(
    post,
    path = "/api/dashboard/next",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Próxima página (sem efeito se não houver cursor)", body = DashboardView)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn next_page(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, Json<DashboardView>) {
    let (jar, id) = dashboard_instance(jar, app_state.cookie_secure);
    let view = app_state.dashboard_service.next_page(id, session).await;
    (jar, Json(view))
}

// POST /api/dashboard/prev
#[utoipa::path(
    post,
    path = "/api/dashboard/prev",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Página anterior (sem efeito na página 1)", body = DashboardView)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn prev_page(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> (CookieJar, Json<DashboardView>) {
    let (jar, id) = dashboard_instance(jar, app_state.cookie_secure);
    let view = app_state.dashboard_service.prev_page(id, session).await;
    (jar, Json(view))
}
