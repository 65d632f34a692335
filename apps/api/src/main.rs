mod config;
mod errors;
mod extract;
mod llm_client;
mod review;
mod routes;
mod state;
mod throttle;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::review::generator::{LlmReviewGenerator, ReviewGenerator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::throttle::{MemoryThrottle, RedisThrottle, RequestThrottle};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparsable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mentor API v{}", env!("CARGO_PKG_VERSION"));

    let throttle = build_throttle(&config)?;
    let generator = build_generator(&config)?;

    let state = AppState {
        config: config.clone(),
        throttle,
        generator,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Shared Redis counter when `REDIS_URL` is set, otherwise per-process.
fn build_throttle(config: &Config) -> Result<Arc<dyn RequestThrottle>> {
    let limit = config.throttle_max_requests;
    let window = config.throttle_window_secs;

    match &config.redis_url {
        Some(url) => {
            let throttle = RedisThrottle::new(url, limit, window)?;
            info!("Throttle: redis ({limit} requests / {window}s)");
            Ok(Arc::new(throttle))
        }
        None => {
            info!("Throttle: in-memory ({limit} requests / {window}s)");
            Ok(Arc::new(MemoryThrottle::new(
                limit,
                Duration::from_secs(window),
            )))
        }
    }
}

fn build_generator(config: &Config) -> Result<Option<Arc<dyn ReviewGenerator>>> {
    let Some(api_key) = &config.openai_api_key else {
        warn!("OPENAI_API_KEY not set; serving heuristic reviews only");
        return Ok(None);
    };

    let llm = LlmClient::new(api_key.clone(), config.openai_model.clone())?;
    info!("LLM client initialized (model: {})", llm.model());
    Ok(Some(Arc::new(LlmReviewGenerator::new(llm))))
}
