// src/middleware/cache.rs

use axum::{
    http::{header, HeaderValue},
    response::Response,
};

// As respostas do dashboard dependem do estado atual; nada de cache.
pub async fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
