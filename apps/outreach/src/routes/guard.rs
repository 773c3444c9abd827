//! Route guard: the redirect rule applied to every navigation.
//!
//! A token bars `/` (sent to `/dashboard`); no token bars `/dashboard` and
//! everything under it (sent to `/`). Other paths pass through.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::session::cookies;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

fn is_dashboard_path(path: &str) -> bool {
    path == "/dashboard" || path.starts_with("/dashboard/")
}

pub fn decide(path: &str, has_token: bool) -> GuardDecision {
    if is_dashboard_path(path) && !has_token {
        return GuardDecision::Redirect("/");
    }
    if path == "/" && has_token {
        return GuardDecision::Redirect("/dashboard");
    }
    GuardDecision::Allow
}

pub async fn route_guard(request: Request, next: Next) -> Response {
    let has_token = cookies::read(request.headers(), cookies::TOKEN_COOKIE)
        .is_some_and(|token| !token.is_empty());
    let path = request.uri().path().to_string();

    match decide(&path, has_token) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(to) => {
            debug!(from = %path, to, "Route guard redirect");
            Redirect::temporary(to).into_response()
        }
    }
}
