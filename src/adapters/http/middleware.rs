use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use time::OffsetDateTime;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, TokenError},
    application::jwt,
};

/// Rejects requests without a valid bearer token. On success the verified
/// `jwt::Claims` are stored in the request extensions for downstream handlers.
pub async fn require_bearer(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = bearer_token(request.headers())?;
        jwt::verify(token, &app_state.keys, OffsetDateTime::now_utc())?
    };

    tracing::debug!(subject = claims.sub, "Bearer token accepted");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// `None` when no Authorization header is present.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, TokenError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| TokenError::Malformed)?;
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or(TokenError::Malformed)
}
