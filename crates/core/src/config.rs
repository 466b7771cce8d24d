//! Session configuration for the ranobes.com client.
//!
//! Values come from `~/.config/ranobes-provider/config.toml` with
//! environment variables taking precedence (`DLE_USER_ID`, `DLE_PASSWORD`,
//! `PHPSESSID`, `RANOBES_BASE_URL`, `RANOBES_TIMEOUT_SECS`). The three DLE
//! session cookies are required; everything else has defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://ranobes.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully resolved session settings, passed into the client at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub dle_user_id: String,
    pub dle_password: String,
    pub phpsessid: String,
    /// Site root without a trailing slash (e.g. "https://ranobes.com").
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// On-disk shape of `config.toml`. Every field is optional; validation
/// happens when resolving into a [`SessionConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub dle_user_id: Option<String>,
    pub dle_password: Option<String>,
    pub phpsessid: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl SessionConfig {
    /// Resolve config from the default file path and process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(load_file_config(), |key| std::env::var(key).ok())
    }

    /// Resolve from explicit sources. Environment wins over the file.
    fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let cookie = |key: &'static str, from_file: Option<String>| {
            env(key)
                .or(from_file)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingCookie(key))
        };

        let dle_user_id = cookie("DLE_USER_ID", file.dle_user_id)?;
        let dle_password = cookie("DLE_PASSWORD", file.dle_password)?;
        let phpsessid = cookie("PHPSESSID", file.phpsessid)?;

        let base_url = env("RANOBES_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match env("RANOBES_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("RANOBES_TIMEOUT_SECS={raw}")))?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            dle_user_id,
            dle_password,
            phpsessid,
            base_url,
            timeout_secs,
        })
    }

    /// Render the `Cookie` request header value for the three session cookies.
    pub fn cookie_header(&self) -> String {
        format!(
            "dle_user_id={}; dle_password={}; PHPSESSID={}",
            self.dle_user_id, self.dle_password, self.phpsessid
        )
    }
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("ranobes-provider");
        p.push("config.toml");
        p
    })
}

/// Load the config file, falling back to defaults if absent or malformed.
fn load_file_config() -> FileConfig {
    let path = match config_path() {
        Some(p) => p,
        None => return FileConfig::default(),
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return FileConfig::default(),
    };

    match toml::from_str::<FileConfig>(&content) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("ignoring malformed config file {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

/// Resolved-but-unvalidated view of the config sources. Cookie values are
/// reduced to set/unset flags.
#[derive(Debug, Serialize)]
pub struct ConfigStatus {
    pub config_file: Option<PathBuf>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub dle_user_id_set: bool,
    pub dle_password_set: bool,
    pub phpsessid_set: bool,
}

/// Report which settings are present without requiring a complete config.
pub fn config_status() -> ConfigStatus {
    let file = load_file_config();
    let env = |key: &str| std::env::var(key).ok();
    let set = |key: &str, from_file: &Option<String>| {
        env(key)
            .or_else(|| from_file.clone())
            .is_some_and(|v| !v.trim().is_empty())
    };

    ConfigStatus {
        config_file: config_path(),
        base_url: env("RANOBES_BASE_URL")
            .or_else(|| file.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string(),
        timeout_secs: env("RANOBES_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
        dle_user_id_set: set("DLE_USER_ID", &file.dle_user_id),
        dle_password_set: set("DLE_PASSWORD", &file.dle_password),
        phpsessid_set: set("PHPSESSID", &file.phpsessid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn env_from(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_resolve_from_env_only() {
        let env = env_from(&[
            ("DLE_USER_ID", "42"),
            ("DLE_PASSWORD", "abc123"),
            ("PHPSESSID", "sess"),
        ]);
        let config = SessionConfig::resolve(FileConfig::default(), env).unwrap();
        assert_eq!(config.dle_user_id, "42");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            dle_user_id: Some("file-id".to_string()),
            dle_password: Some("file-pw".to_string()),
            phpsessid: Some("file-sess".to_string()),
            base_url: Some("https://mirror.example/".to_string()),
            timeout_secs: Some(5),
        };
        let env = env_from(&[("DLE_USER_ID", "env-id")]);
        let config = SessionConfig::resolve(file, env).unwrap();
        assert_eq!(config.dle_user_id, "env-id");
        assert_eq!(config.dle_password, "file-pw");
        assert_eq!(config.base_url, "https://mirror.example");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_missing_cookie_is_an_error() {
        let env = env_from(&[("DLE_USER_ID", "42"), ("DLE_PASSWORD", "abc")]);
        let err = SessionConfig::resolve(FileConfig::default(), env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCookie("PHPSESSID")));
    }

    #[test]
    fn test_blank_cookie_counts_as_missing() {
        let env = env_from(&[
            ("DLE_USER_ID", "  "),
            ("DLE_PASSWORD", "abc"),
            ("PHPSESSID", "sess"),
        ]);
        let err = SessionConfig::resolve(FileConfig::default(), env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCookie("DLE_USER_ID")));
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let env = env_from(&[
            ("DLE_USER_ID", "42"),
            ("DLE_PASSWORD", "abc"),
            ("PHPSESSID", "sess"),
            ("RANOBES_TIMEOUT_SECS", "soon"),
        ]);
        let err = SessionConfig::resolve(FileConfig::default(), env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_cookie_header_format() {
        let env = env_from(&[
            ("DLE_USER_ID", "42"),
            ("DLE_PASSWORD", "abc123"),
            ("PHPSESSID", "sess"),
        ]);
        let config = SessionConfig::resolve(FileConfig::default(), env).unwrap();
        assert_eq!(
            config.cookie_header(),
            "dle_user_id=42; dle_password=abc123; PHPSESSID=sess"
        );
    }
}
