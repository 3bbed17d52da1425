//! Application configuration management.
//!
//! Configuration is read from environment variables (optionally seeded from a `.env` file)
//! and deserialized with `envy` into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. Without it the server keeps
///   everything in memory, which is only suitable for local runs.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `PUBLIC_BASE_URL` (optional): where the widget script is hosted, defaults to `http://localhost:3000`
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,
}

fn default_port() -> u16 {
    3000
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if present. Field names map to upper-case variables
    /// (`public_base_url` -> `PUBLIC_BASE_URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed into its field type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        let mut config = envy::from_env::<Config>()?;
        config.normalize();
        Ok(config)
    }

    /// Strip trailing slashes from the base URL and treat a blank database URL as unset.
    fn normalize(&mut self) {
        let trimmed = self.public_base_url.trim().trim_end_matches('/').to_string();
        self.public_base_url = trimmed;

        if self
            .database_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.database_url = None;
        }
    }
}
