use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_vizplay_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VIZPLAY_CONFIG_PATH", "/tmp/vizplay-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/vizplay-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("vizplay")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("vizplay")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_analysis_tap_contract() {
    let s = Settings::default();
    assert_eq!(s.audio.fft_size, 1024);
    assert_eq!(s.audio.smoothing, 0.8);
    assert_eq!(s.audio.initial_volume, 0.8);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
repeat = true

[audio]
initial_volume = 0.5
fft_size = 2048
smoothing = 0.6

[visualizer]
fps = 30
background = [0, 0, 0]

[controls]
scrub_seconds = 9

[ui]
header_text = "hello"

[library]
recursive = false
include_hidden = true
follow_links = false
default_artist = "Unknown"

[logging]
file = "/tmp/vizplay.log"
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIZPLAY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIZPLAY__AUDIO__FFT_SIZE");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
    assert!(s.playback.repeat);
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.fft_size, 2048);
    assert_eq!(s.audio.smoothing, 0.6);
    // untouched keys keep their defaults
    assert_eq!(s.audio.volume_step, 0.05);
    assert_eq!(s.visualizer.fps, 30);
    assert_eq!(s.visualizer.background, [0, 0, 0]);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.default_artist, "Unknown");
    assert_eq!(
        s.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/vizplay.log"))
    );
    assert_eq!(s.logging.level, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
fft_size = 2048
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIZPLAY_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VIZPLAY__AUDIO__FFT_SIZE", "512");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.fft_size, 512);
}

#[test]
fn partial_toml_fills_remaining_sections_from_defaults() {
    let s: Settings = toml::from_str("[controls]\nscrub_seconds = 2\n").unwrap();
    assert_eq!(s.controls.scrub_seconds, 2);
    assert_eq!(s.visualizer.fps, 60);
    assert_eq!(s.library.default_artist, "Local file");
    assert!(s.logging.file.is_none());
}

#[test]
fn validate_rejects_unusable_values() {
    let mut s = Settings::default();
    s.audio.fft_size = 1000;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.smoothing = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.min_db = -20.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.initial_volume = 1.37;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.visualizer.fps = 0;
    assert!(s.validate().is_err());
}
