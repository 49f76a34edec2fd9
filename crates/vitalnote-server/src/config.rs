//! Runtime settings, read from the environment.

use std::path::Path;

use anyhow::Context;

use vitalnote_core::models::config::VitalNoteConfig;

/// Secret used when `API_SECRET` is unset. Only suitable for local development.
pub const DEFAULT_API_SECRET: &str = "a-string-secret-at-least-256-bits-long";

/// Settings for one server process.
#[derive(Debug, Clone)]
pub struct Settings {
    /// File-backed configuration (or defaults).
    pub config: VitalNoteConfig,

    /// HMAC secret bearer tokens are signed with.
    pub api_secret: String,

    /// Tracing filter directive, e.g. `info` or `vitalnote_core=debug`.
    pub log_level: String,
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// - `VITALNOTE_CONFIG`: path to a JSON config file
    /// - `VITALNOTE_LISTEN_ADDR`: overrides `server.listen_addr`
    /// - `API_SECRET`: token signing secret
    /// - `LOG_LEVEL`: tracing filter, default `info`
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("VITALNOTE_CONFIG") {
            Some(path) => VitalNoteConfig::from_file(Path::new(&path))
                .with_context(|| format!("failed to load config from {path}"))?,
            None => VitalNoteConfig::default(),
        };

        if let Some(addr) = lookup("VITALNOTE_LISTEN_ADDR") {
            config.server.listen_addr = addr;
        }

        let api_secret = lookup("API_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_SECRET.to_string());

        let log_level = lookup("LOG_LEVEL")
            .map(|l| l.to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            config,
            api_secret,
            log_level,
        })
    }
}
