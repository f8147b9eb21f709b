use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::domain::solver_factory::SolverType;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB
const DEFAULT_CACHE_SIZE: usize = 128;

/// Server settings read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub json_limit: usize,
    pub solver: SolverType,
    pub solver_timeout: Option<Duration>,
    /// Number of cached plans, 0 disables the cache
    pub cache_size: usize,
    pub sentry_dsn: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            solver: SolverType::default(),
            solver_timeout: None,
            cache_size: DEFAULT_CACHE_SIZE,
            sentry_dsn: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; bad numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let solver = match lookup("SOLVER").filter(|s| !s.trim().is_empty()) {
            Some(name) => SolverType::from_str(&name).ok_or_else(|| {
                let available: Vec<&str> =
                    SolverType::available().iter().map(|s| s.as_str()).collect();
                format!(
                    "Unknown solver '{}', available: {}",
                    name,
                    available.join(", "),
                )
            })?,
            None => defaults.solver,
        };

        let solver_timeout = parse_or(&lookup, "SOLVER_TIMEOUT_SECS", 0u64);

        Ok(ServerConfig {
            port: parse_or(&lookup, "PORT", defaults.port),
            json_limit: parse_or(&lookup, "JSON_PAYLOAD_LIMIT", defaults.json_limit),
            solver,
            solver_timeout: (solver_timeout > 0).then(|| Duration::from_secs(solver_timeout)),
            cache_size: parse_or(&lookup, "CACHE_SIZE", defaults.cache_size),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring unparseable {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}
