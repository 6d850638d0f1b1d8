//! URL utilities for consistent URL handling
//!
//! The completion service is addressed by a URL path that embeds the
//! deployment name and API version. Endpoints arrive from the environment
//! with or without trailing slashes, so construction goes through a
//! normalization step to prevent double slashes.

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use palaver::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://example.openai.azure.com"), "https://example.openai.azure.com");
/// assert_eq!(normalize_base_url("https://example.openai.azure.com/"), "https://example.openai.azure.com");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct the chat-completion URL for a deployment
///
/// # Examples
///
/// ```
/// use palaver::utils::url::completion_url;
///
/// assert_eq!(
///     completion_url("https://example.openai.azure.com/", "gpt-4o-mini", "2024-08-01-preview"),
///     "https://example.openai.azure.com/openai/deployments/gpt-4o-mini/chat/completions?api-version=2024-08-01-preview"
/// );
/// ```
pub fn completion_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    let base = normalize_base_url(endpoint);
    format!("{base}/openai/deployments/{deployment}/chat/completions?api-version={api_version}")
}
