//! Runtime configuration read from environment variables.
//!
//! `main` loads an optional `.env` file with `dotenvy` before calling
//! [Config::from_env], so the same variables can come from either place.

use crate::errors::{Error, Result};

const DEFAULT_DATABASE_NAME: &str = "household_expenses";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Which browser origins may call the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: AllowedOrigins,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Only `MONGODB_URI` is required; everything else falls back to a
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongodb_uri = lookup("MONGODB_URI")
            .filter(|uri| !uri.trim().is_empty())
            .ok_or_else(|| Error::Config("You need to add the MONGODB_URI to the env".to_string()))?;

        let database_name =
            lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|err| Error::Config(format!("invalid PORT {port:?}: {err}")))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|origins| parse_origins(&origins))
            .unwrap_or(AllowedOrigins::Any);

        Ok(Config {
            mongodb_uri,
            database_name,
            host,
            port,
            cors_origins,
        })
    }
}

fn parse_origins(origins: &str) -> AllowedOrigins {
    let origins: Vec<String> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}
