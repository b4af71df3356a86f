use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::login::{CredentialVerifier, FixedAccount, LoginUseCases},
    infra::{config::AppConfig, error::InfraError, key_material::KeyPair},
};
use secrecy::{ExposeSecret, SecretString};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Load configuration and key material. Any failure here is fatal.
pub fn init_app_state() -> Result<AppState, InfraError> {
    from_config(AppConfig::from_env())
}

pub fn from_config(config: AppConfig) -> Result<AppState, InfraError> {
    let keys = Arc::new(KeyPair::load(
        &config.private_key_path,
        &config.public_key_path,
    )?);

    let account = Arc::new(FixedAccount::new(
        config.login_username.clone(),
        SecretString::new(config.login_password.expose_secret().into()),
        config.login_subject_id,
    ));

    let login_use_cases = LoginUseCases::new(
        account as Arc<dyn CredentialVerifier>,
        keys.clone(),
        config.access_token_ttl,
    );

    Ok(AppState {
        config: Arc::new(config),
        keys,
        login_use_cases: Arc::new(login_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "keygate=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let json_layer = File::create("keygate.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{jwt, use_cases::login::Credentials},
        infra::key_material::KeyLoadError,
        test_utils::{fixture_path, t0, test_config},
    };

    #[test]
    fn test_missing_private_key_aborts_startup() {
        let mut config = test_config();
        config.private_key_path = "does/not/exist.pem".into();

        let result = from_config(config);

        assert!(matches!(
            result,
            Err(InfraError::KeyMaterial(KeyLoadError::Read { path, .. }))
                if path.ends_with("exist.pem")
        ));
    }

    #[test]
    fn test_mismatched_key_files_abort_startup() {
        let mut config = test_config();
        config.public_key_path = fixture_path("foreign_public_key.pem");

        let result = from_config(config);

        assert!(matches!(
            result,
            Err(InfraError::KeyMaterial(KeyLoadError::Mismatch))
        ));
    }

    #[test]
    fn test_fixture_config_builds_working_state() {
        let state = match from_config(test_config()) {
            Ok(state) => state,
            Err(err) => panic!("startup failed: {err}"),
        };

        let credentials = Credentials {
            username: "admin".to_string(),
            password: SecretString::new("password".into()),
        };
        let token = state
            .login_use_cases
            .login(&credentials, t0())
            .unwrap();
        let claims = jwt::verify(Some(&token), &state.keys, t0()).unwrap();
        assert_eq!(claims.sub, 1);
    }
}
