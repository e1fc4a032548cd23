use std::path::PathBuf;

use biblioteca_core::environment::Environment;
use biblioteca_db::store::StorageBackend;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except
/// `DATABASE_URL`, which the Postgres backends require.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Deployment environment resolved from `APP_ENV`.
    pub environment: Environment,
    /// Where the catalog lives.
    pub backend: StorageBackend,
    /// Postgres connection string.
    pub database_url: Option<String>,
    /// Pool size for the Postgres backends.
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory of static assets served for unmatched routes.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `APP_ENV`              | `NODE_ENV`, else `development` |
    /// | `DATABASE_URL`         | unset                      |
    /// | `CATALOG_BACKEND`      | `environment`              |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STATIC_DIR`           | unset                      |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let app_env = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_default();
        let environment = Environment::resolve(&app_env);
        if !app_env.trim().is_empty() && Environment::parse(&app_env).is_none() {
            tracing::warn!(app_env = %app_env, "Unknown APP_ENV, using development profile");
        }

        let backend = StorageBackend::from_name(
            &lookup("CATALOG_BACKEND").unwrap_or_else(|| "environment".into()),
        )
        .unwrap_or_else(|e| panic!("Invalid CATALOG_BACKEND: {e}"));

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let db_max_connections: u32 = lookup("DB_MAX_CONNECTIONS")
            .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
            .unwrap_or(biblioteca_db::DEFAULT_MAX_CONNECTIONS);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = lookup("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = lookup("STATIC_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            environment,
            backend,
            database_url,
            db_max_connections,
            cors_origins,
            request_timeout_secs,
            static_dir,
        }
    }
}
