use std::{env, path::PathBuf};

use crate::error::{Error, Result};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `VIZPLAY__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("VIZPLAY")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject values the analyser, render loop or mixer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let audio = &self.audio;
        if audio.fft_size < 32 || !audio.fft_size.is_power_of_two() {
            return Err(Error::InvalidConfig(
                "audio.fft_size must be a power of two >= 32".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&audio.smoothing) {
            return Err(Error::InvalidConfig(
                "audio.smoothing must be within [0, 1]".to_string(),
            ));
        }
        if audio.min_db >= audio.max_db {
            return Err(Error::InvalidConfig(
                "audio.min_db must be lower than audio.max_db".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&audio.initial_volume) {
            return Err(Error::InvalidConfig(
                "audio.initial_volume must be within [0, 1]".to_string(),
            ));
        }
        if self.visualizer.fps == 0 {
            return Err(Error::InvalidConfig("visualizer.fps must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Resolve the config path from `VIZPLAY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("VIZPLAY_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/vizplay/config.toml`
/// or `~/.config/vizplay/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("vizplay").join("config.toml"))
}
