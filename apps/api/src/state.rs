use std::sync::Arc;

use crate::config::Config;
use crate::review::generator::ReviewGenerator;
use crate::throttle::RequestThrottle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable throttle. Default: MemoryThrottle. RedisThrottle when REDIS_URL is set.
    pub throttle: Arc<dyn RequestThrottle>,
    /// Generated-review backend; `None` keeps every request on the heuristic engine.
    pub generator: Option<Arc<dyn ReviewGenerator>>,
}
