use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use time::Duration;

use crate::application::jwt::SubjectId;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub access_token_ttl: Duration,
    /// The single account accepted by `/login`.
    pub login_username: String,
    pub login_password: SecretString,
    pub login_subject_id: SubjectId,
    pub cors_origin: HeaderValue,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:5000".parse().unwrap());

        let private_key_path: String =
            get_env_default("PRIVATE_KEY_PATH", "private_key.pem".to_string());
        let public_key_path: String =
            get_env_default("PUBLIC_KEY_PATH", "public_key.pem".to_string());

        let access_token_ttl_secs: i64 = get_env_default("ACCESS_TOKEN_TTL_SECS", 3_600);

        let login_username: String = get_env_default("LOGIN_USERNAME", "admin".to_string());
        let login_password: String = get_env_default("LOGIN_PASSWORD", "password".to_string());
        let login_subject_id: SubjectId = get_env_default("LOGIN_SUBJECT_ID", 1);

        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        Self {
            bind_addr,
            private_key_path: PathBuf::from(private_key_path),
            public_key_path: PathBuf::from(public_key_path),
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            login_username,
            login_password: SecretString::new(login_password.into()),
            login_subject_id,
            cors_origin,
        }
    }
}
