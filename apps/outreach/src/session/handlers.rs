//! Signup, login and logout. These run outside the route guard.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::gateway::{AuthSession, GatewayError, LoginRequest, PayloadError, SignupRequest};
use crate::session::cookies;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user_name: Option<String>,
    pub redirect: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn auth_error(fallback: &str, e: GatewayError) -> AppError {
    let missing_token = matches!(
        &e,
        GatewayError::Payload(PayloadError::MissingField(field)) if field == "token"
    );
    if missing_token {
        AppError::gateway("No token received", e)
    } else {
        AppError::gateway_or(fallback, e)
    }
}

/// Sets both session cookies and creates the in-memory session.
async fn start_session(state: &AppState, auth: AuthSession) -> Response {
    state
        .sessions
        .get_or_create(&auth.token, auth.user_name.clone())
        .await;

    let jar = cookies::with_session(
        CookieJar::new(),
        &auth.token,
        auth.user_name.as_deref(),
        state.config.session_max_age(),
    );
    (
        jar,
        Json(AuthResponse {
            user_name: auth.user_name,
            redirect: "/dashboard",
        }),
    )
        .into_response()
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// POST /auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<Response, AppError> {
    require("name", &form.name)?;
    require("email", &form.email)?;
    require("password", &form.password)?;

    let auth = state
        .gateway
        .signup(&SignupRequest {
            name: form.name,
            email: form.email,
            password: form.password,
        })
        .await
        .map_err(|e| auth_error("Signup failed", e))?;

    info!("Signup successful");
    Ok(start_session(&state, auth).await)
}

/// POST /auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Response, AppError> {
    require("email", &form.email)?;
    require("password", &form.password)?;

    let auth = state
        .gateway
        .login(&LoginRequest {
            email: form.email,
            password: form.password,
        })
        .await
        .map_err(|e| auth_error("Login failed", e))?;

    info!("Login successful");
    Ok(start_session(&state, auth).await)
}

/// POST /auth/logout
///
/// Clears both cookies, drops the dashboard state and sends the user home.
pub async fn handle_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(cookies::TOKEN_COOKIE) {
        state.sessions.remove(token.value_trimmed()).await;
    }
    (cookies::cleared(jar), Redirect::to("/")).into_response()
}
