//! Test utilities shared by unit and HTTP tests.
//!
//! This module provides:
//! - Fixed RSA key pairs loaded from `tests/fixtures/`
//! - A reference instant for clock-dependent assertions
//! - A builder for `AppState` with a configurable login account

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::{Duration, OffsetDateTime};

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::SubjectId,
        use_cases::login::{FixedAccount, LoginUseCases},
    },
    infra::{config::AppConfig, key_material::KeyPair},
};

pub const PRIVATE_KEY_PEM: &[u8] = include_bytes!("../../tests/fixtures/private_key.pem");
pub const PUBLIC_KEY_PEM: &[u8] = include_bytes!("../../tests/fixtures/public_key.pem");
pub const FOREIGN_PRIVATE_KEY_PEM: &[u8] =
    include_bytes!("../../tests/fixtures/foreign_private_key.pem");
pub const FOREIGN_PUBLIC_KEY_PEM: &[u8] =
    include_bytes!("../../tests/fixtures/foreign_public_key.pem");

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// The service's own key pair.
pub fn test_key_pair() -> KeyPair {
    KeyPair::from_pem(PRIVATE_KEY_PEM, PUBLIC_KEY_PEM).expect("fixture key pair")
}

/// A valid key pair unrelated to `test_key_pair`.
pub fn foreign_key_pair() -> KeyPair {
    KeyPair::from_pem(FOREIGN_PRIVATE_KEY_PEM, FOREIGN_PUBLIC_KEY_PEM).expect("foreign key pair")
}

/// 2023-11-14T22:13:20Z
pub fn t0() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid timestamp")
}

/// Config pointing at the fixture key pair with the default admin account.
pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        private_key_path: fixture_path("private_key.pem"),
        public_key_path: fixture_path("public_key.pem"),
        access_token_ttl: Duration::hours(1),
        login_username: "admin".to_string(),
        login_password: SecretString::new("password".into()),
        login_subject_id: 1,
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
    }
}

pub struct TestAppStateBuilder {
    username: String,
    password: String,
    subject: SubjectId,
    token_ttl: Duration,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
            subject: 1,
            token_ttl: Duration::hours(1),
        }
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, username: &str, password: &str, subject: SubjectId) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self.subject = subject;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn build(self) -> AppState {
        let keys = Arc::new(test_key_pair());
        let config = AppConfig {
            access_token_ttl: self.token_ttl,
            login_username: self.username.clone(),
            login_password: SecretString::new(self.password.clone().into()),
            login_subject_id: self.subject,
            ..test_config()
        };

        let account = FixedAccount::new(
            self.username,
            SecretString::new(self.password.into()),
            self.subject,
        );
        let login_use_cases = LoginUseCases::new(Arc::new(account), keys.clone(), self.token_ttl);

        AppState {
            config: Arc::new(config),
            keys,
            login_use_cases: Arc::new(login_use_cases),
        }
    }
}
