use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    application::use_cases::login::LoginUseCases,
    infra::{config::AppConfig, key_material::KeyPair},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: Arc<KeyPair>,
    pub login_use_cases: Arc<LoginUseCases>,
}

impl FromRef<AppState> for Arc<LoginUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.login_use_cases.clone()
    }
}
