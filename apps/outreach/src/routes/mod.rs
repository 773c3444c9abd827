pub mod guard;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::dashboard::handlers;
use crate::session::handlers as auth;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(health::landing_handler))
        // Session
        .route("/auth/signup", post(auth::handle_signup))
        .route("/auth/login", post(auth::handle_login))
        .route("/auth/logout", post(auth::handle_logout))
        // Dashboard
        .route("/dashboard", get(handlers::handle_mount))
        .route("/dashboard/profile/reload", post(handlers::handle_reload))
        .route("/dashboard/tab", put(handlers::handle_switch_tab))
        .route("/dashboard/upload", post(handlers::handle_upload))
        .route("/dashboard/send", post(handlers::handle_send))
        .route("/dashboard/settings", put(handlers::handle_save_settings))
        .route("/dashboard/templates", post(handlers::handle_create_template))
        .route(
            "/dashboard/templates/:id",
            delete(handlers::handle_delete_template),
        )
        .route(
            "/dashboard/templates/default/enhance",
            post(handlers::handle_enhance_template),
        )
        .route("/dashboard/logs", delete(handlers::handle_clear_logs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(guard::route_guard))
        .with_state(state)
}
