//! Base-URL resolution.

/// Environment variable that overrides the billing API address.
pub const API_BASE_ENV: &str = "BILLING_API_BASE";

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Console configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
}

impl Config {
    /// Use `api_base` when it is set and non-blank, else the default.
    pub fn new(api_base: Option<String>) -> Self {
        let api_base = api_base
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self { api_base }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(API_BASE_ENV).ok())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default() {
        assert_eq!(Config::new(None).api_base, "http://localhost:8080");
        assert_eq!(Config::default().api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn blank_override_is_ignored() {
        assert_eq!(Config::new(Some("  ".to_string())).api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn override_wins() {
        let config = Config::new(Some("https://billing.internal".to_string()));
        assert_eq!(config.api_base, "https://billing.internal");
    }
}
