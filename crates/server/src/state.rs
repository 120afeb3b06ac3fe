use crate::config::ServerConfig;
use crate::error::ServerResult;
use dashmap::DashMap;
use metrics_exporter_prometheus::PrometheusHandle;
use refind::JsonStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Rate limit tracking: admin token -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, std::time::Instant)>>,

    /// JSON-file store (shared across requests)
    pub store: Arc<JsonStore>,

    /// Prometheus recorder handle, installed once by `start_server`
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state without a metrics recorder (tests and
    /// embedded use)
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Self::with_metrics(config, None)
    }

    /// Create new server state with an installed Prometheus handle
    pub fn with_metrics(
        config: ServerConfig,
        metrics: Option<PrometheusHandle>,
    ) -> ServerResult<Self> {
        let store = Arc::new(JsonStore::open(&config.data_dir)?);

        Ok(Self {
            config: Arc::new(config),
            rate_limiter: Arc::new(DashMap::new()),
            store,
            metrics,
        })
    }

    /// Check if an admin token is valid
    pub fn is_valid_admin_token(&self, token: &str) -> bool {
        self.config.admin_tokens.contains(token)
    }

    /// Check rate limit for an admin token
    pub fn check_rate_limit(&self, token: &str) -> bool {
        let now = std::time::Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self
            .rate_limiter
            .entry(token.to_string())
            .or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        // Check limit
        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}
