/// Default base URL for completion gateway requests.
pub const DEFAULT_COMPLETION_BASE_URL: &str = "http://localhost:3000";

/// Normalize a base URL to a completion endpoint.
///
/// Normalization rules:
/// 1) keep `/api/completion` unchanged
/// 2) append `/completion` when path ends in `/api`
/// 3) append `/api/completion` otherwise
pub fn normalize_completion_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_COMPLETION_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/api/completion") {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/api") {
        return format!("{trimmed}/completion");
    }
    format!("{trimmed}/api/completion")
}
