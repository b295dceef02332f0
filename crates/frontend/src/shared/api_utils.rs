//! API base URL resolution for frontend-backend communication

/// Origin of the page, e.g. "https://admin.example.com"
///
/// Empty string if window is not available.
pub fn window_origin() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Resolve the configured base URL.
///
/// A configured value wins; otherwise the REST service is expected under
/// `/api` on the same origin as the console.
pub fn resolve_api_base(configured: &str) -> String {
    let configured = configured.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    format!("{}/api", window_origin())
}

/// Join a base and an endpoint with exactly one slash between them
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
///
/// let url = join_url("https://x.test/api", "/admins");
/// assert_eq!(url, "https://x.test/api/admins");
/// ```
pub fn join_url(base: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Percent-encode a path segment (ids coming from the server are opaque)
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://x.test/api/", "/admins"), "https://x.test/api/admins");
        assert_eq!(join_url("https://x.test/api", "admins"), "https://x.test/api/admins");
        assert_eq!(join_url("https://x.test/api", "https://cdn.test/f"), "https://cdn.test/f");
    }

    #[test]
    fn test_configured_base_wins() {
        assert_eq!(resolve_api_base("https://api.test/v1/"), "https://api.test/v1");
    }

    #[test]
    fn test_path_segment() {
        assert_eq!(path_segment("a b/c"), "a%20b%2Fc");
    }
}
