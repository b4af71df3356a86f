use jsonwebtoken::{
    Algorithm, Header, Validation, decode, decode_header, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::app_error::{AppError, AppResult, TokenError};
use crate::infra::key_material::KeyPair;

pub type SubjectId = i64;

// ============================================================================
// Access Token Claims
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: SubjectId,
    pub iat: i64,
    pub exp: i64,
}

/// Sign an RS256 access token for `subject`, valid from `now` until `now + ttl`.
pub fn issue(
    subject: SubjectId,
    keys: &KeyPair,
    now: OffsetDateTime,
    ttl: Duration,
) -> AppResult<String> {
    let iat = now.unix_timestamp();
    let exp = iat
        .checked_add(ttl.whole_seconds())
        .ok_or_else(|| AppError::Internal(format!("token lifetime {ttl} is out of range")))?;
    let claims = Claims {
        sub: subject,
        iat,
        exp,
    };
    let header = Header::new(Algorithm::RS256);
    encode(&header, &claims, keys.encoding_key()).map_err(|e| AppError::Internal(e.to_string()))
}

/// Verify a bearer token and return its claims.
///
/// The structure is parsed first, then the signature is checked, and only then
/// is the embedded expiry trusted. A token is expired once `now >= exp`.
pub fn verify(
    token: Option<&str>,
    keys: &KeyPair,
    now: OffsetDateTime,
) -> Result<Claims, TokenError> {
    let token = match token {
        Some(token) if !token.trim().is_empty() => token,
        _ => return Err(TokenError::Missing),
    };

    if token.split('.').count() != 3 {
        return Err(TokenError::Malformed);
    }
    decode_header(token).map_err(|err| {
        tracing::debug!(error = %err, "Token header could not be parsed");
        TokenError::Malformed
    })?;

    let claims = decode::<Claims>(token, keys.decoding_key(), &validation())
        .map(|data| data.claims)
        .map_err(rejection)?;

    if now.unix_timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    // jsonwebtoken reads the system clock and accepts `now == exp`; expiry is
    // checked in `verify` instead.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

/// Classify a failure from `decode` on a token whose header already parsed.
///
/// The signature segment is base64-decoded and checked over the raw
/// `header.payload` text before the payload is read, so a base64 or crypto
/// error here belongs to the signature.
fn rejection(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::Base64(_)
        | ErrorKind::Crypto(_) => TokenError::InvalidSignature,
        _ => {
            tracing::debug!(error = %err, "Token could not be parsed");
            TokenError::Malformed
        }
    }
}
