pub mod auth;
pub mod cursor_manager;
pub mod dashboard_controller;
pub mod dashboard_service;
