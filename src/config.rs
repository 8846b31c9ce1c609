//! Runtime configuration: TOML file under the XDG config dir, then env overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::model::is_valid_email;

/// Env var overriding [`Config::endpoint`].
pub const ENV_ENDPOINT: &str = "PVS_CONTACT_ENDPOINT";
/// Env var overriding [`Config::contact_email`].
pub const ENV_CONTACT_EMAIL: &str = "PVS_CONTACT_EMAIL";
/// Env var overriding [`Config::challenge_site_key`].
pub const ENV_CHALLENGE_SITE_KEY: &str = "PVS_CONTACT_CHALLENGE_SITE_KEY";

const DEFAULT_ENDPOINT: &str = "https://formspree.io/f/xqaykbel";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An endpoint override is not a URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The contact address fails the same check the form applies.
    #[error("contact email appears invalid: {0}")]
    InvalidContactEmail(String),

    /// A duration option was set to zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The draft key cannot be used as a storage key.
    #[error("invalid draft storage key: {0:?}")]
    InvalidDraftKey(String),
}

/// When field errors become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorDisplay {
    /// Only after the field lost focus or a submit attempt failed.
    #[default]
    Touched,
    /// As soon as an error is computed.
    Eager,
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Form-collection endpoint receiving the JSON POST.
    pub endpoint: Url,
    /// Key the draft is stored under.
    pub draft_storage_key: String,
    /// Address shown next to the form and copied by "Copy Email".
    pub contact_email: String,
    /// Enables the anti-automation challenge when set.
    pub challenge_site_key: Option<String>,
    /// Helper program that prints a challenge token.
    pub challenge_command: Option<String>,
    pub toast_duration_ms: u64,
    pub copied_indicator_ms: u64,
    pub submit_timeout_secs: u64,
    /// Upper bound on waiting for a challenge token.
    pub challenge_timeout_ms: u64,
    pub error_display: ErrorDisplay,
    /// Shows the "Clear Draft" action.
    pub allow_clear_draft: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("valid hardcoded URL"),
            draft_storage_key: "pvs-contact-draft-v5".into(),
            contact_email: "premiervirtualsolutions4u@gmail.com".into(),
            challenge_site_key: None,
            challenge_command: None,
            toast_duration_ms: 2000,
            copied_indicator_ms: 1500,
            submit_timeout_secs: 15,
            challenge_timeout_ms: 5000,
            error_display: ErrorDisplay::Touched,
            allow_clear_draft: true,
        }
    }
}

impl Config {
    /// Parses a (possibly partial) TOML document; missing keys take defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads configuration.
    ///
    /// Reads `path` if given, else `~/.config/pvs-contact/config.toml` when it
    /// exists, else defaults. Environment overrides are applied afterwards and
    /// the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(|| {
            default_config_path().filter(|p| p.is_file())
        });

        let mut config = match path {
            Some(path) => {
                let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by env var name.
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup(ENV_ENDPOINT) {
            self.endpoint = Url::parse(&v)?;
        }
        if let Some(v) = lookup(ENV_CONTACT_EMAIL) {
            self.contact_email = v;
        }
        if let Some(v) = lookup(ENV_CHALLENGE_SITE_KEY) {
            self.challenge_site_key = (!v.is_empty()).then_some(v);
        }
        Ok(())
    }

    /// Checks invariants the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_email(&self.contact_email) {
            return Err(ConfigError::InvalidContactEmail(self.contact_email.clone()));
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration("toast_duration_ms"));
        }
        if self.copied_indicator_ms == 0 {
            return Err(ConfigError::ZeroDuration("copied_indicator_ms"));
        }
        if self.submit_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("submit_timeout_secs"));
        }
        if self.challenge_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("challenge_timeout_ms"));
        }
        let key_ok = !self.draft_storage_key.is_empty()
            && self
                .draft_storage_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !key_ok {
            return Err(ConfigError::InvalidDraftKey(self.draft_storage_key.clone()));
        }
        Ok(())
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn copied_indicator_duration(&self) -> Duration {
        Duration::from_millis(self.copied_indicator_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    pub fn challenge_timeout(&self) -> Duration {
        Duration::from_millis(self.challenge_timeout_ms)
    }

    /// Site key to request a challenge token for, if the challenge is enabled.
    pub fn challenge_site_key(&self) -> Option<&str> {
        self.challenge_site_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// `~/.config/pvs-contact/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pvs-contact").join("config.toml"))
}
