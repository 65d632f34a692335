//! Per-client fixed-window request throttle.
//!
//! `AppState` carries an `Arc<dyn RequestThrottle>`. `MemoryThrottle` is per-process;
//! `RedisThrottle` shares counts across instances when `REDIS_URL` is set.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::http::HeaderMap;
use redis::aio::MultiplexedConnection;
use tokio::sync::OnceCell;
use tracing::warn;

/// Past this many tracked clients, expired windows are swept on insert.
const EVICTION_THRESHOLD: usize = 10_000;

#[async_trait]
pub trait RequestThrottle: Send + Sync {
    /// Counts one request for `key`; `false` once the window's budget is spent.
    async fn allow(&self, key: &str) -> bool;
}

/// Client key: first `X-Forwarded-For` hop, then `X-Real-IP`, then the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<std::net::SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

pub struct MemoryThrottle {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryThrottle {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn register(&self, key: &str, now: Instant) -> bool {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if windows.len() >= EVICTION_THRESHOLD && !windows.contains_key(key) {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        entry.count = entry.count.saturating_add(1);
        entry.count <= self.max_requests
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or_default()
    }
}

#[async_trait]
impl RequestThrottle for MemoryThrottle {
    async fn allow(&self, key: &str) -> bool {
        self.register(key, Instant::now())
    }
}

/// Redis-backed counter (`INCR` + `EXPIRE`). Fails open when Redis is unreachable.
pub struct RedisThrottle {
    client: redis::Client,
    connection: OnceCell<MultiplexedConnection>,
    max_requests: u32,
    window_secs: u64,
}

impl RedisThrottle {
    pub fn new(redis_url: &str, max_requests: u32, window_secs: u64) -> redis::RedisResult<Self> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
            connection: OnceCell::new(),
            max_requests,
            window_secs,
        })
    }

    async fn increment(&self, key: &str) -> redis::RedisResult<u64> {
        let mut conn = self
            .connection
            .get_or_try_init(|| self.client.get_multiplexed_tokio_connection())
            .await?
            .clone();

        let redis_key = format!("mentor:throttle:{key}");
        let count: u64 = redis::cmd("INCR")
            .arg(&redis_key)
            .query_async(&mut conn)
            .await?;
        if count == 1 {
            redis::cmd("EXPIRE")
                .arg(&redis_key)
                .arg(self.window_secs)
                .query_async::<_, ()>(&mut conn)
                .await?;
        }
        Ok(count)
    }
}

#[async_trait]
impl RequestThrottle for RedisThrottle {
    async fn allow(&self, key: &str) -> bool {
        match self.increment(key).await {
            Ok(count) => count <= u64::from(self.max_requests),
            Err(e) => {
                warn!("throttle store unavailable, allowing request: {e}");
                true
            }
        }
    }
}
