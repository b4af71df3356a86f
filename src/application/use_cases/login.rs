use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::jwt::{self, SubjectId},
    infra::key_material::KeyPair,
};

#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// The authority of record for username/password pairs.
pub trait CredentialVerifier: Send + Sync {
    fn verify_credentials(&self, credentials: &Credentials) -> Option<SubjectId>;
}

/// A single configured account.
pub struct FixedAccount {
    username: String,
    password: SecretString,
    subject: SubjectId,
}

impl FixedAccount {
    pub fn new(username: String, password: SecretString, subject: SubjectId) -> Self {
        Self {
            username,
            password,
            subject,
        }
    }
}

impl CredentialVerifier for FixedAccount {
    fn verify_credentials(&self, credentials: &Credentials) -> Option<SubjectId> {
        let matches = credentials.username == self.username
            && credentials.password.expose_secret() == self.password.expose_secret();
        matches.then_some(self.subject)
    }
}

#[derive(Clone)]
pub struct LoginUseCases {
    verifier: Arc<dyn CredentialVerifier>,
    keys: Arc<KeyPair>,
    token_ttl: Duration,
}

impl LoginUseCases {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        keys: Arc<KeyPair>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            verifier,
            keys,
            token_ttl,
        }
    }

    /// Check `credentials` and mint an access token valid for the configured TTL.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub fn login(&self, credentials: &Credentials, now: OffsetDateTime) -> AppResult<String> {
        let Some(subject) = self.verifier.verify_credentials(credentials) else {
            tracing::info!("Login rejected");
            return Err(AppError::InvalidCredentials);
        };

        let token = jwt::issue(subject, &self.keys, now, self.token_ttl)?;
        tracing::info!(subject, "Issued access token");
        Ok(token)
    }
}
