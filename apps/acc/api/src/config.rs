use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig,
};

// Import database configs from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where users are stored
#[derive(Clone, Debug)]
pub enum Storage {
    Postgres(PostgresConfig),
    /// Process-local store, emptied on restart
    Memory,
}

impl FromEnv for Storage {
    /// `STORAGE`: `postgres` (default, requires `DATABASE_URL`) or `memory`
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("STORAGE", "postgres");

        match backend.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Storage::Postgres(PostgresConfig::from_env()?)),
            "memory" => Ok(Storage::Memory),
            other => Err(ConfigError::ParseError {
                key: "STORAGE".to_string(),
                details: format!("unknown storage backend '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: Storage,
    /// Apply pending migrations at start-up (PostgreSQL only)
    pub run_migrations: bool,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let storage = Storage::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            storage,
            run_migrations,
            server,
            environment,
        })
    }
}
