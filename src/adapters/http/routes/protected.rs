use axum::{Extension, Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::{
    adapters::http::app_state::AppState,
    application::jwt::{Claims, SubjectId},
};

#[derive(Serialize)]
struct AccessGranted {
    message: &'static str,
    user_id: SubjectId,
}

/// Routes that sit behind `require_bearer`.
pub fn router() -> Router<AppState> {
    Router::new().route("/protected", get(protected))
}

/// GET /protected
async fn protected(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(AccessGranted {
        message: "Access granted",
        user_id: claims.sub,
    })
}
