//! Server configuration (bind address).

/// Configuration for the provider server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host:port to bind (e.g. "127.0.0.1:3030" or "0.0.0.0:3030").
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3030".to_string(),
        }
    }
}

impl ServerConfig {
    /// Build config from environment (and defaults).
    /// - `RANOBES_PROVIDER_BIND`: host:port (default: 127.0.0.1:3030)
    pub fn from_env() -> Self {
        let mut c = Self::default();
        if let Ok(b) = std::env::var("RANOBES_PROVIDER_BIND") {
            c.bind = b;
        }
        c
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind
    }
}
