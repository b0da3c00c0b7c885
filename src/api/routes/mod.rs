//! Route groups served by the flow harness

pub mod oauth;

use std::sync::{Arc, RwLock};

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined router for all route groups
pub fn router() -> Router<SharedState> {
    Router::new().merge(oauth::router())
}
