pub mod api;
pub mod app;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod templates;
pub mod utils;
