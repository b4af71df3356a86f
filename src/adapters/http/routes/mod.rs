pub mod auth;
pub mod protected;

use axum::{Router, middleware};

use crate::adapters::http::{app_state::AppState, middleware::require_bearer};

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new().merge(auth::router()).merge(
        protected::router().route_layer(middleware::from_fn_with_state(app_state, require_bearer)),
    )
}
