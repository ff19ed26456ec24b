use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Result, anyhow};
use tracing::{info, warn};

pub const DEFAULT_ALLOWED_DOMAINS: [&str; 2] = ["utb.edu.ec", "salutb.edu.ec"];
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_timeout: Duration,
    pub allowed_domains: Vec<String>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            upstream_timeout: Duration::from_secs(10),
            allowed_domains: DEFAULT_ALLOWED_DOMAINS.map(String::from).to_vec(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let timeout_secs: u64 = try_load("RELAY_TIMEOUT_SECS", "10")?;
        let domains: String =
            try_load("RELAY_ALLOWED_DOMAINS", &DEFAULT_ALLOWED_DOMAINS.join(","))?;

        Ok(Self {
            port: try_load("RELAY_PORT", "1111")?,
            upstream_timeout: Duration::from_secs(timeout_secs),
            allowed_domains: parse_domains(&domains),
            user_agent: try_load("RELAY_USER_AGENT", DEFAULT_USER_AGENT)?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Invalid {key} value {value:?}: {e}")
    })
}

fn parse_domains(list: &str) -> Vec<String> {
    let domains: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|domain| !domain.is_empty())
        .map(String::from)
        .collect();

    if domains.is_empty() {
        warn!("Relay allowlist is empty, every target will be rejected");
    }

    domains
}
