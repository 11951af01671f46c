use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub tenant_registry_database_url: Option<String>,
    pub tenant_config_file: Option<String>,
    pub repository_operation_timeout_ms: u64,
    pub postgres_max_connections: u32,
    pub postgres_acquire_timeout_ms: u64,
    pub log_filter: String,
    pub warmup_tenant_ids: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            tenant_registry_database_url: non_empty_var("TENANT_REGISTRY_DATABASE_URL"),
            tenant_config_file: non_empty_var("TENANT_CONFIG_FILE"),
            repository_operation_timeout_ms: std::env::var("REPOSITORY_OPERATION_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            postgres_max_connections: std::env::var("POSTGRES_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            postgres_acquire_timeout_ms: std::env::var("POSTGRES_ACQUIRE_TIMEOUT_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            log_filter: std::env::var("LOG_FILTER")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            warmup_tenant_ids: std::env::var("WARMUP_TENANT_IDS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| s.to_string())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// `None` when timeouts are disabled with `REPOSITORY_OPERATION_TIMEOUT_MS=0`.
    pub fn repository_operation_timeout(&self) -> Option<Duration> {
        (self.repository_operation_timeout_ms > 0)
            .then(|| Duration::from_millis(self.repository_operation_timeout_ms))
    }

    pub fn postgres_acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.postgres_acquire_timeout_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tenant_registry_database_url: None,
            tenant_config_file: None,
            repository_operation_timeout_ms: 5000,
            postgres_max_connections: 5,
            postgres_acquire_timeout_ms: 3000,
            log_filter: "info".to_string(),
            warmup_tenant_ids: Vec::new(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
