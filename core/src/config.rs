//! Client configuration read from the environment.

/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = "USERS_API_BASE_URL";

/// The public mock API the screens were written against.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `USERS_API_BASE_URL`, falling back to the public mock API when it
    /// is unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
