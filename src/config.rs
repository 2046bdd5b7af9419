use crate::controller::{default_initial_date, ControllerOptions};
use crate::state::Screen;
use crate::transition::TransitionTimings;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Screen the process starts on (default: welcome)
    #[serde(default = "default_initial_screen")]
    pub initial_screen: Screen,
    /// Calendar date selected at start-up
    #[serde(default = "default_initial_date")]
    pub initial_date: NaiveDate,
    /// Simulated identity provider round-trip in milliseconds
    #[serde(default = "default_social_login_delay_ms")]
    pub social_login_delay_ms: u64,
    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Calendar ↔ daily view animation delays
    #[serde(default)]
    pub transitions: TransitionConfig,
}

/// Delays of the two-phase calendar ↔ daily view hand-off, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Time the calendar needs to extract the target day before the push
    #[serde(default = "default_enter_commit_ms")]
    pub enter_commit_ms: u64,
    /// Inbound animation of the daily view
    #[serde(default = "default_enter_settle_ms")]
    pub enter_settle_ms: u64,
    /// Delay before the daily view is popped
    #[serde(default = "default_leave_commit_ms")]
    pub leave_commit_ms: u64,
    /// Outbound animation back to the calendar
    #[serde(default = "default_leave_settle_ms")]
    pub leave_settle_ms: u64,
}

fn default_initial_screen() -> Screen {
    Screen::Welcome
}

fn default_social_login_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_enter_commit_ms() -> u64 {
    300
}

fn default_enter_settle_ms() -> u64 {
    800
}

fn default_leave_commit_ms() -> u64 {
    100
}

fn default_leave_settle_ms() -> u64 {
    600
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enter_commit_ms: default_enter_commit_ms(),
            enter_settle_ms: default_enter_settle_ms(),
            leave_commit_ms: default_leave_commit_ms(),
            leave_settle_ms: default_leave_settle_ms(),
        }
    }
}

impl From<TransitionConfig> for TransitionTimings {
    fn from(config: TransitionConfig) -> Self {
        Self {
            enter_commit: Duration::from_millis(config.enter_commit_ms),
            enter_settle: Duration::from_millis(config.enter_settle_ms),
            leave_commit: Duration::from_millis(config.leave_commit_ms),
            leave_settle: Duration::from_millis(config.leave_settle_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_screen: default_initial_screen(),
            initial_date: default_initial_date(),
            social_login_delay_ms: default_social_login_delay_ms(),
            log_level: default_log_level(),
            transitions: TransitionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or create (and write) the default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            if config.log_level.trim().is_empty() {
                config.log_level = default_log_level();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with owner-only permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// Controller start-up parameters described by this config
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            initial_screen: self.initial_screen,
            initial_date: self.initial_date,
            timings: self.transitions.into(),
            social_login_delay: Duration::from_millis(self.social_login_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.initial_screen, Screen::Welcome);
        assert_eq!(config.transitions.enter_commit_ms, 300);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.initial_screen = Screen::Calendar;
        config.save(&config_path).unwrap();

        let loaded = Config::load_or_create(&config_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            indoc::indoc! {r#"
                initial_screen = "home"
                initial_date = "2021-01-15"

                [transitions]
                enter_commit_ms = 50
            "#},
        )
        .unwrap();

        let config = Config::load_or_create(&config_path).unwrap();
        assert_eq!(config.initial_screen, Screen::Home);
        assert_eq!(config.initial_date, NaiveDate::from_ymd_opt(2021, 1, 15).unwrap());
        assert_eq!(config.transitions.enter_commit_ms, 50);
        assert_eq!(config.transitions.enter_settle_ms, 800);
        assert_eq!(config.social_login_delay_ms, 1000);
    }

    #[test]
    fn test_unknown_screen_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "initial_screen = \"dashboard\"\n").unwrap();
        assert!(Config::load_or_create(&config_path).is_err());
    }

    #[test]
    fn test_controller_options() {
        let options = Config::default().controller_options();
        assert_eq!(options.timings, TransitionTimings::default());
        assert_eq!(options.social_login_delay, Duration::from_millis(1000));
    }
}
