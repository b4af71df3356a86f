use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    response::IntoResponse,
    routing::post,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::use_cases::login::Credentials,
};

#[derive(Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /login
/// Form-encoded `username` and `password`; answers `{ "token": ... }` or a bare 401.
async fn login(
    State(app_state): State<AppState>,
    payload: Result<Form<LoginPayload>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let Form(payload) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let credentials = Credentials {
        username: payload.username,
        password: SecretString::new(payload.password.into()),
    };

    let token = app_state
        .login_use_cases
        .login(&credentials, OffsetDateTime::now_utc())?;

    Ok(Json(LoginResponse { token }))
}
