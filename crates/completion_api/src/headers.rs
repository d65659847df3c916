use std::collections::BTreeMap;

use crate::config::CompletionConfig;
use crate::error::CompletionApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "User-Agent";

/// Build a deterministic header map for completion gateway requests.
pub fn build_headers(
    config: &CompletionConfig,
    user_agent: Option<&str>,
) -> Result<BTreeMap<String, String>, CompletionApiError> {
    let mut headers = BTreeMap::new();

    if config.api_key.trim().is_empty() {
        return Err(CompletionApiError::MissingApiKey);
    }

    headers.insert(
        HEADER_AUTHORIZATION.to_owned(),
        format!("Bearer {}", config.api_key.trim()),
    );
    headers.insert(HEADER_ACCEPT.to_owned(), "text/plain".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let ua = match (user_agent, config.user_agent.as_deref()) {
        (Some(explicit), _) if !explicit.trim().is_empty() => Some(explicit.trim().to_owned()),
        (None, Some(explicit)) if !explicit.trim().is_empty() => Some(explicit.trim().to_owned()),
        _ => None,
    };
    if let Some(ua) = ua {
        headers.insert(HEADER_USER_AGENT.to_owned(), ua);
    }

    for (key, value) in &config.extra_headers {
        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_owned());
    }

    Ok(headers)
}
