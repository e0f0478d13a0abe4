pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod jwt;
pub mod models;
pub mod report;
pub mod repository;
pub mod service;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use errors::AppError;
pub use state::AppState;
