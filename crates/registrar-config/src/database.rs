use std::env;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset.
    pub fn from_env() -> Option<Self> {
        let url = env::var("DATABASE_URL").ok()?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Some(Self {
            url,
            max_connections,
        })
    }
}
