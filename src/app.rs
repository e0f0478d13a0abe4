use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/laporan", get(handlers::printable_report))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::me))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/report", get(handlers::report))
        .route("/api/report/export", get(handlers::export_report))
        .route(
            "/api/gerbangs",
            get(handlers::list_gerbangs).post(handlers::create_gerbang),
        )
        .route(
            "/api/gerbangs/:id",
            get(handlers::get_gerbang)
                .put(handlers::update_gerbang)
                .delete(handlers::delete_gerbang),
        )
        .with_state(state)
}
