use crate::app_error::{AppError, ErrorCode, TokenError};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(_) => tracing::error!(error = ?self, "Request failed"),
            _ => tracing::info!(error = %self, "Request rejected"),
        }

        match self {
            // The login form only learns that it was refused.
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED.into_response(),
            AppError::Token(err) => {
                let status = match err {
                    TokenError::Missing => StatusCode::BAD_REQUEST,
                    TokenError::Malformed | TokenError::InvalidSignature | TokenError::Expired => {
                        StatusCode::UNAUTHORIZED
                    }
                };
                error_resp(status, err.into(), Some(err.to_string()))
            }
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, None)
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
