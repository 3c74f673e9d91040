// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Upper bound (and default) for the `limit` query parameter on paginated
/// list endpoints.
pub const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    /// Apply the bundled sample dataset at startup when the database is new.
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://progresso.db".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let seed_on_start = env::var("SEED_ON_START")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            database_url,
            rust_log,
            seed_on_start,
        }
    }
}
