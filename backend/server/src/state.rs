use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, redirect::Policy};

use super::{config::Config, utils::is_allowed};

const MAX_REDIRECTS: usize = 10;

pub struct State {
    pub config: Config,
    pub client: Client,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.upstream_timeout)
            .redirect(redirect_policy(config.allowed_domains.clone()))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Arc::new(Self { config, client }))
    }
}

/// Redirects are only followed while they stay on the allowlist.
fn redirect_policy(allowed_domains: Vec<String>) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if is_allowed(attempt.url().as_str(), &allowed_domains) {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}
