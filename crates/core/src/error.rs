/// Top-level error type. All public API functions return this.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metadata lookup error: {0}")]
    Lookup(#[from] LookupError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing session cookie (set {0})")]
    MissingCookie(&'static str),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Session cookies rejected: the site answered with its login page")]
    Unauthenticated,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("Failed to parse page: {0}")]
    Parse(String),
}
