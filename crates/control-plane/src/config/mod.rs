// Server configuration loaded from environment variables
// Decision: No DATABASE_URL means dev mode on the in-memory store

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Frontend dev server origin allowed by default
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Default PostgreSQL pool size
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// HTTP server and storage settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Optional prefix for all API routes (e.g. "/api")
    pub api_prefix: String,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_allowed_origins: Vec<String>,
    /// PostgreSQL URL; None selects the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_prefix: String::new(),
            cors_allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            database_url: None,
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allowed_origins);

        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.database_max_connections);

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_prefix: normalize_prefix(&var("API_PREFIX").unwrap_or_default()),
            cors_allowed_origins,
            database_url: var("DATABASE_URL"),
            database_max_connections,
        }
    }
}

/// "api/" -> "/api"; "" and "/" -> ""
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
