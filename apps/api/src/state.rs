use std::sync::Arc;

use crate::config::Config;
use crate::copy::generator::Copywriter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests never coordinate through it.
#[derive(Clone)]
pub struct AppState {
    pub copywriter: Arc<Copywriter>,
    pub config: Config,
}
