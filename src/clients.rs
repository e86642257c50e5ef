pub mod auth_client;
pub use auth_client::{AuthorizationApi, HttpAuthorizationApi};
pub mod sales_client;
pub use sales_client::{HttpSalesApi, SalesApi};

#[cfg(test)]
pub mod fake;
