use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::Map;
use serde::Deserialize;

/// Signing key used when no secret is configured.
///
/// Kept for compatibility with existing deployments; the server logs a
/// warning at startup whenever it is in effect.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over the individual parts
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.database
            ),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Longest accepted token lifetime (100 years).
    pub const MAX_EXPIRATION_HOURS: i64 = 876_000;

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.expiration_hours)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    pub salt_rounds: u32,
}

/// Sections that may be set through `SECTION__KEY` environment variables.
const SECTIONS: &[&str] = &["SERVER", "DATABASE", "JWT", "PASSWORD"];

/// Flat environment variables recognised alongside the `SECTION__KEY` form.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USERNAME", "database.username"),
    ("DB_PASSWORD", "database.password"),
    ("DB_DATABASE", "database.database"),
    ("JWT_SECRET", "jwt.secret"),
    ("BCRYPT_SALT_ROUNDS", "password.salt_rounds"),
];

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat environment variables (JWT_SECRET, BCRYPT_SALT_ROUNDS, PORT, DB_HOST, ...)
    /// 2. Nested environment variables (DATABASE__URL, SERVER__PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    /// Same as [`Config::load`] but reads variables from `vars` instead of
    /// the process environment.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let run_mode = vars
            .get("RUN_MODE")
            .cloned()
            .unwrap_or_else(|| "development".to_string());

        // Unrelated variables such as a bare `PASSWORD` must not shadow a section
        let nested: Map<String, String> = vars
            .iter()
            .filter(|(name, _)| {
                SECTIONS.iter().any(|section| {
                    name.strip_prefix(section)
                        .is_some_and(|rest| rest.starts_with("__"))
                })
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let mut builder = ConfigBuilder::builder()
            .set_default("server.port", 3000)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.username", "postgres")?
            .set_default("database.password", "postgres")?
            .set_default("database.database", "omega_db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt.expiration_hours", 24)?
            .set_default("password.salt_rounds", auth::PasswordHasher::DEFAULT_COST)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .ignore_empty(true)
                    .source(Some(nested)),
            );

        for (variable, key) in LEGACY_VARIABLES {
            builder = builder.set_override_option(*key, vars.get(*variable).cloned())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}
