//! Layered configuration for the demo binary.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! TOML file, then `RENDER_PEEK_*` environment variables (`__` separates
//! nested keys), then command-line [`Overrides`]. Validation runs on the
//! merged result.
//!
//! ```toml
//! tick = "1s"
//! poll = "50ms"
//! theme = "dark"
//! log_filter = "render_peek=debug"
//! log_file = "render-peek.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::peek::duration::parse_duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RENDER_PEEK";

/// Terminal theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Demo settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interval between parent re-renders (e.g., "1s").
    pub tick: String,
    /// Input poll timeout of the main loop (e.g., "50ms").
    pub poll: String,
    pub theme: ThemeChoice,
    /// `tracing` filter directives.
    pub log_filter: String,
    /// Log destination in interactive mode. Logging is off without one,
    /// since the terminal belongs to the UI.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick: "1s".to_string(),
            poll: "50ms".to_string(),
            theme: ThemeChoice::Auto,
            log_filter: "render_peek=info".to_string(),
            log_file: None,
        }
    }
}

/// Values given on the command line; each one wins over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tick: Option<String>,
    pub theme: Option<ThemeChoice>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from defaults, an optional file, the environment and
    /// `overrides`, then validate the result.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to read settings")?;

        let mut settings: Settings = config
            .try_deserialize()
            .context("invalid settings")?;
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(tick) = overrides.tick {
            self.tick = tick;
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = Some(log_file);
        }
    }

    /// Check that the durations parse and the tick interval is nonzero.
    pub fn validate(&self) -> Result<()> {
        let tick = self.tick_interval()?;
        if tick.is_zero() {
            anyhow::bail!("tick interval must be greater than zero");
        }
        self.poll_timeout()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Result<Duration> {
        parse_duration(&self.tick).with_context(|| format!("invalid tick: {:?}", self.tick))
    }

    pub fn poll_timeout(&self) -> Result<Duration> {
        parse_duration(&self.poll).with_context(|| format!("invalid poll: {:?}", self.poll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval().unwrap(), Duration::from_secs(1));
        assert_eq!(settings.poll_timeout().unwrap(), Duration::from_millis(50));
        assert_eq!(settings.theme, ThemeChoice::Auto);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
tick = "250ms"
theme = "light"
log_file = "peek.log"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(settings.tick_interval().unwrap(), Duration::from_millis(250));
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.log_file, Some(PathBuf::from("peek.log")));
        // Unset keys keep their defaults.
        assert_eq!(settings.poll, "50ms");
    }

    #[test]
    fn test_invalid_tick_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"tick = "often""#).unwrap();
        assert!(Settings::load(Some(file.path()), Overrides::default()).is_err());

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"tick = "0s""#).unwrap();
        assert!(Settings::load(Some(file.path()), Overrides::default()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("missing.toml");
        assert!(Settings::load(Some(&path), Overrides::default()).is_err());
    }

    #[test]
    fn test_zero_tick_set_after_loading_is_rejected() {
        let mut settings = Settings::load(None, Overrides::default()).unwrap();
        settings.tick = "0ms".to_string();
        assert!(settings.validate().is_err());

        let overrides = Overrides {
            tick: Some("0ms".to_string()),
            ..Overrides::default()
        };
        assert!(Settings::load(None, overrides).is_err());
    }

    #[test]
    fn test_overrides_win_before_validation() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"tick = "0s""#).unwrap();

        let overrides = Overrides {
            tick: Some("10ms".to_string()),
            theme: Some(ThemeChoice::Dark),
            log_file: Some(PathBuf::from("cli.log")),
        };
        let settings = Settings::load(Some(file.path()), overrides).unwrap();
        assert_eq!(settings.tick_interval().unwrap(), Duration::from_millis(10));
        assert_eq!(settings.theme, ThemeChoice::Dark);
        assert_eq!(settings.log_file, Some(PathBuf::from("cli.log")));
    }
}
