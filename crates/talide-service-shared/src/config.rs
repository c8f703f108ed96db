//! Environment-driven configuration for the route service.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TALIDE_MAPS_DIR` | `/data/maps` | Directory of `*.json` maps loaded at startup |
//! | `SERVICE_PORT` | `8080` | HTTP listen port |
//! | `TALIDE_MAX_DEPTH` | `256` | Hop limit per explored branch |
//! | `TALIDE_MAX_PATHS` | `100000` | Complete paths collected per request |
//! | `TALIDE_MAX_EXPANSIONS` | `1000000` | Edges followed per request |
//!
//! A limit of `0` disables that limit.

use std::path::PathBuf;

use talide_lib::SearchLimits;

pub const DEFAULT_MAPS_DIR: &str = "/data/maps";
pub const DEFAULT_PORT: u16 = 8080;

/// Settings the route service reads at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub maps_dir: PathBuf,
    pub port: u16,
    pub limits: SearchLimits,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from(DEFAULT_MAPS_DIR),
            port: DEFAULT_PORT,
            limits: SearchLimits::default(),
        }
    }
}

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value for {}: '{}'", self.var, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let maps_dir = lookup("TALIDE_MAPS_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.maps_dir);

        let port = match lookup("SERVICE_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError {
                var: "SERVICE_PORT",
                value,
            })?,
            None => defaults.port,
        };

        let limits = SearchLimits {
            max_depth: parse_limit(&lookup, "TALIDE_MAX_DEPTH", defaults.limits.max_depth)?,
            max_paths: parse_limit(&lookup, "TALIDE_MAX_PATHS", defaults.limits.max_paths)?,
            max_expansions: parse_limit(
                &lookup,
                "TALIDE_MAX_EXPANSIONS",
                defaults.limits.max_expansions,
            )?,
        };

        Ok(Self {
            maps_dir,
            port,
            limits,
        })
    }
}

fn parse_limit<F>(
    lookup: &F,
    var: &'static str,
    default: Option<usize>,
) -> Result<Option<usize>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.trim().parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(limit) => Ok(Some(limit)),
        Err(_) => Err(ConfigError { var, value }),
    }
}
