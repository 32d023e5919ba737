use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::web::{AppState, auth, dashboard};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::home))
        .route("/login_register", get(auth::login_register_page))
        .route("/register_process", post(auth::process_register))
        .route("/login_process", post(auth::process_login))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/logout", get(auth::logout))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
