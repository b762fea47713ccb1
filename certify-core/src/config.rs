//! YAML configuration.
//!
//! # Lookup order
//!
//! 1. explicit path (`certify --config <path>`)
//! 2. `./certify.yaml`
//! 3. `<config_dir>/certify/config.yaml`
//! 4. built-in defaults
//!
//! Every key is optional. SMTP credentials may be supplied through
//! `CERTIFY_SMTP_USERNAME` / `CERTIFY_SMTP_PASSWORD` instead of the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const LOCAL_CONFIG_FILE: &str = "certify.yaml";
pub const ENV_SMTP_USERNAME: &str = "CERTIFY_SMTP_USERNAME";
pub const ENV_SMTP_PASSWORD: &str = "CERTIFY_SMTP_PASSWORD";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the SMTP connection is encrypted. Plaintext is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// TLS from the first byte (port 465).
    #[default]
    Tls,
    /// Plain connect upgraded with STARTTLS (port 587).
    Starttls,
}

/// Mail relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub tls: TlsMode,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Sender address; falls back to `username` when unset.
    pub from: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            tls: TlsMode::Tls,
            username: None,
            password: None,
            from: None,
        }
    }
}

impl SmtpConfig {
    /// Sender address for outgoing messages.
    pub fn sender(&self) -> Result<&str, ConfigError> {
        self.from
            .as_deref()
            .or(self.username.as_deref())
            .ok_or(ConfigError::Missing("smtp.from"))
    }

    /// `(username, password)` pair required to authenticate.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        let user = self
            .username
            .as_deref()
            .ok_or(ConfigError::Missing("smtp.username"))?;
        let pass = self
            .password
            .as_deref()
            .ok_or(ConfigError::Missing("smtp.password"))?;
        Ok((user, pass))
    }
}

/// Wording of the certificate email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterConfig {
    pub subject: String,
    pub event: String,
    pub organization: String,
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            subject: "Certificate of Participation - Harvinn Technologies Workshop".to_string(),
            event: "Latest Technology Insights and Career Pathway".to_string(),
            organization: "Harvinn Technologies".to_string(),
        }
    }
}

/// Root configuration passed to every pipeline component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding rosters and rendered certificates.
    pub workdir: PathBuf,
    /// Background image for every certificate.
    pub template: PathBuf,
    pub smtp: SmtpConfig,
    pub letter: LetterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("uploads"),
            template: PathBuf::from("templates").join("Training.jpg"),
            smtp: SmtpConfig::default(),
            letter: LetterConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

impl Config {
    /// Parse the YAML file at `path`.
    ///
    /// Returns `ConfigError::Parse` (with path + line context) if malformed.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a config using the lookup order in the module docs.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_at(path);
        }
        for candidate in default_locations() {
            if candidate.is_file() {
                tracing::debug!("using config {}", candidate.display());
                return Self::load_at(&candidate);
            }
        }
        Ok(Self::default())
    }

    /// Apply `CERTIFY_SMTP_*` overrides using `lookup` for variable access.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(user) = lookup(ENV_SMTP_USERNAME).filter(|v| !v.is_empty()) {
            self.smtp.username = Some(user);
        }
        if let Some(pass) = lookup(ENV_SMTP_PASSWORD).filter(|v| !v.is_empty()) {
            self.smtp.password = Some(pass);
        }
        self
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut out = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        out.push(dir.join("certify").join("config.yaml"));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_single_deployment_layout() {
        let cfg = Config::default();
        assert_eq!(cfg.workdir, PathBuf::from("uploads"));
        assert_eq!(cfg.template, PathBuf::from("templates/Training.jpg"));
        assert_eq!(cfg.smtp.port, 465);
        assert_eq!(cfg.smtp.tls, TlsMode::Tls);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: Config = serde_yaml::from_str("smtp:\n  host: mail.example.org\n  tls: starttls\n  port: 587\n")
            .expect("parse");
        assert_eq!(cfg.smtp.host, "mail.example.org");
        assert_eq!(cfg.smtp.tls, TlsMode::Starttls);
        assert_eq!(cfg.workdir, PathBuf::from("uploads"));
        assert_eq!(cfg.letter, LetterConfig::default());
    }

    #[test]
    fn unknown_tls_mode_is_rejected() {
        let err = serde_yaml::from_str::<Config>("smtp:\n  tls: none\n").unwrap_err();
        assert!(err.to_string().contains("none"));
    }

    #[test]
    fn env_overrides_replace_credentials() {
        let env: HashMap<&str, &str> = [
            (ENV_SMTP_USERNAME, "ops@example.org"),
            (ENV_SMTP_PASSWORD, "hunter2"),
        ]
        .into_iter()
        .collect();
        let cfg = Config::default().with_env_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.smtp.credentials().unwrap(), ("ops@example.org", "hunter2"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.smtp.password = Some("from-file".to_string());
        let cfg = cfg.with_env_overrides(|_| Some(String::new()));
        assert_eq!(cfg.smtp.password.as_deref(), Some("from-file"));
    }

    #[test]
    fn sender_falls_back_to_username() {
        let mut smtp = SmtpConfig::default();
        assert!(matches!(smtp.sender(), Err(ConfigError::Missing("smtp.from"))));
        smtp.username = Some("info@example.org".to_string());
        assert_eq!(smtp.sender().unwrap(), "info@example.org");
        smtp.from = Some("noreply@example.org".to_string());
        assert_eq!(smtp.sender().unwrap(), "noreply@example.org");
    }

    #[test]
    fn password_is_never_serialized() {
        let mut cfg = Config::default();
        cfg.smtp.password = Some("secret".to_string());
        let yaml = serde_yaml::to_string(&cfg).expect("serialize");
        assert!(!yaml.contains("secret"));
    }
}
