use reqwest::Response;
use tracing::debug;

use crate::{error::AppError, state::State};

/// Substring match, a target only has to mention one of the allowed domains.
pub fn is_allowed(target: &str, allowed_domains: &[String]) -> bool {
    allowed_domains
        .iter()
        .any(|domain| target.contains(domain.as_str()))
}

pub async fn fetch_upstream(state: &State, target: &str) -> Result<Response, AppError> {
    let response = state.client.get(target).send().await?;

    debug!("Upstream {target} answered {}", response.status());

    if !response.status().is_success() {
        return Err(AppError::UpstreamStatus(response.status()));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::is_allowed;
    use crate::config::DEFAULT_ALLOWED_DOMAINS;

    fn allowed(target: &str) -> bool {
        is_allowed(target, &DEFAULT_ALLOWED_DOMAINS.map(String::from))
    }

    #[test]
    fn test_allowed_targets() {
        assert!(allowed("https://sai.utb.edu.ec/carnet?key=abc"));
        assert!(allowed("https://salutb.edu.ec/"));
        assert!(allowed("utb.edu.ec"));
    }

    #[test]
    fn test_rejected_targets() {
        assert!(!allowed("https://example.com"));
        assert!(!allowed("https://utb.edu.co"));
        assert!(!allowed(""));
    }
}
