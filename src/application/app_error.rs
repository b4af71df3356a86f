use thiserror::Error;

/// Reasons a presented bearer token is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing token")]
    Missing,

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    MissingToken,
    MalformedToken,
    InvalidToken,
    TokenExpired,
    InvalidInput,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingToken => "MISSING_TOKEN",
            ErrorCode::MalformedToken => "MALFORMED_TOKEN",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl From<TokenError> for ErrorCode {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => ErrorCode::MissingToken,
            TokenError::Malformed => ErrorCode::MalformedToken,
            TokenError::InvalidSignature => ErrorCode::InvalidToken,
            TokenError::Expired => ErrorCode::TokenExpired,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
