// src/models/config.rs

//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable holding the portal user name.
pub const USERNAME_ENV: &str = "WP_USERNAME";

/// Environment variable holding the portal password.
pub const PASSWORD_ENV: &str = "WP_PASSWORD";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Portal location and HTTP behavior
    #[serde(default)]
    pub portal: PortalConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.portal.validate()
    }
}

/// Where the portal lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL every relative path is resolved against (trailing slash matters)
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Login endpoint, relative to `base_url`
    #[serde(default = "defaults::login_path")]
    pub login_path: String,

    /// Weekly timetable page, relative to `base_url`
    #[serde(default = "defaults::timetable_path")]
    pub timetable_path: String,

    /// Notification list page, relative to `base_url`
    #[serde(default = "defaults::notifications_path")]
    pub notifications_path: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            login_path: defaults::login_path(),
            timetable_path: defaults::timetable_path(),
            notifications_path: defaults::notifications_path(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

impl PortalConfig {
    /// Portal config rooted at another base URL, other settings default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.endpoints()?;
        for (name, value) in [
            ("portal.login_path", &self.login_path),
            ("portal.timetable_path", &self.timetable_path),
            ("portal.notifications_path", &self.notifications_path),
            ("portal.user_agent", &self.user_agent),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::config(format!("{name} is empty")));
            }
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config("portal.timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Resolve the base and login URLs.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let base = Url::parse(&self.base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "portal.base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        let login = base.join(&self.login_path)?;
        Ok(Endpoints { base, login })
    }
}

/// Resolved portal URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
    login: Url,
}

impl Endpoints {
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn login(&self) -> &Url {
        &self.login
    }

    /// Resolve a path relative to the portal base.
    ///
    /// The result always stays under the base URL: absolute URLs,
    /// scheme-relative and root-relative paths, and `..` escapes are refused.
    pub fn resolve(&self, relative_path: &str) -> Result<Url> {
        let outside = || {
            AppError::config(format!(
                "'{relative_path}' is outside the portal base {}",
                self.base
            ))
        };
        if relative_path.starts_with(['/', '\\']) || Url::parse(relative_path).is_ok() {
            return Err(outside());
        }
        let url = self.base.join(relative_path)?;
        if url.origin() != self.base.origin() || !url.path().starts_with(self.base.path()) {
            return Err(outside());
        }
        Ok(url)
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Portal login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `WP_USERNAME` and `WP_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::config(format!("environment variable {key} is not set")))
        };
        Ok(Self::new(read(USERNAME_ENV)?, read(PASSWORD_ENV)?))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://tpuwcwebsv.pu-toyama.ac.jp/webclass/".into()
    }
    pub fn login_path() -> String {
        "login.php".into()
    }
    pub fn timetable_path() -> String {
        "index.php".into()
    }
    pub fn notifications_path() -> String {
        "informations.php".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; webclass/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
