//! Configuration for the autotest harness.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (`PSP_AUTOTEST_MEMSTICK`, ...)
//! 2. Project-local config file (`./psp-autotest.toml`)
//! 3. User config file (`~/.config/psp-autotest/config.toml`)
//! 4. Built-in defaults
//!
//! The merged [`Config`] is an explicit value handed to the runner; nothing
//! in this crate reads process-wide settings behind the caller's back.
//!
//! # Config File Format
//!
//! ```toml
//! # psp-autotest.toml
//!
//! # Directory holding pspautotests/tests/ (the memstick root)
//! memstick_dir = "/media/memstick"
//!
//! # Execute with the JIT instead of the interpreter
//! use_jit = false
//!
//! # Emulate audio output during test runs
//! enable_sound = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::CpuBackend;

/// Harness configuration.
///
/// All fields are optional so that merging can tell "set by this source"
/// apart from "absent"; defaults are resolved by the accessors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Directory under which `pspautotests/tests/` lives.
    pub memstick_dir: Option<String>,

    /// Execute test images with the JIT instead of the interpreter.
    pub use_jit: Option<bool>,

    /// Emulate audio output during test runs.
    pub enable_sound: Option<bool>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Project-local `psp-autotest.toml`
    /// 3. User config `~/.config/psp-autotest/config.toml`
    /// 4. Defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        if let Some(local_config) = Self::load_local_config() {
            config.merge(local_config);
        }

        config.apply_env_overrides();

        config
    }

    /// The memstick root, with fallback to the current directory.
    pub fn memstick_dir(&self) -> PathBuf {
        self.memstick_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// CPU backend implied by the settings. Defaults to the interpreter.
    pub fn cpu_backend(&self) -> CpuBackend {
        if self.use_jit.unwrap_or(false) {
            CpuBackend::Jit
        } else {
            CpuBackend::Interpreter
        }
    }

    /// Whether to emulate audio output. Defaults to off.
    pub fn enable_sound(&self) -> bool {
        self.enable_sound.unwrap_or(false)
    }

    /// Load user configuration from ~/.config/psp-autotest/config.toml
    fn load_user_config() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("psp-autotest").join("config.toml");
        Self::load_from_file(&config_path)
    }

    /// Load project-local configuration from ./psp-autotest.toml
    fn load_local_config() -> Option<Self> {
        let local_path = Path::new("psp-autotest.toml");
        if let Some(config) = Self::load_from_file(local_path) {
            return Some(config);
        }

        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let project_path = Path::new(&manifest_dir).join("psp-autotest.toml");
            if let Some(config) = Self::load_from_file(&project_path) {
                return Some(config);
            }
        }

        None
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    fn merge(&mut self, other: Self) {
        if other.memstick_dir.is_some() {
            self.memstick_dir = other.memstick_dir;
        }
        if other.use_jit.is_some() {
            self.use_jit = other.use_jit;
        }
        if other.enable_sound.is_some() {
            self.enable_sound = other.enable_sound;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("PSP_AUTOTEST_MEMSTICK") {
            log::info!("Using PSP_AUTOTEST_MEMSTICK from environment: {}", dir);
            self.memstick_dir = Some(dir);
        }
        if let Some(flag) = Self::env_flag("PSP_AUTOTEST_JIT") {
            self.use_jit = Some(flag);
        }
        if let Some(flag) = Self::env_flag("PSP_AUTOTEST_SOUND") {
            self.enable_sound = Some(flag);
        }
    }

    /// Parse a boolean environment variable.
    fn env_flag(name: &str) -> Option<bool> {
        match std::env::var(name).ok()?.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            other => {
                log::warn!("Ignoring unrecognized value for {}: {}", name, other);
                None
            }
        }
    }

    /// Get the path to the user config file (for display/creation).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("psp-autotest").join("config.toml"))
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# psp-autotest configuration
# Place this file at ~/.config/psp-autotest/config.toml or ./psp-autotest.toml

# Directory holding pspautotests/tests/ (the memstick root)
memstick_dir = "/media/memstick"

# Execute with the JIT instead of the interpreter
# use_jit = false

# Emulate audio output during test runs
# enable_sound = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.memstick_dir(), PathBuf::from("."));
        assert_eq!(config.cpu_backend(), CpuBackend::Interpreter);
        assert!(!config.enable_sound());
    }

    #[test]
    fn test_cpu_backend_selection() {
        let config = Config {
            use_jit: Some(true),
            ..Default::default()
        };
        assert_eq!(config.cpu_backend(), CpuBackend::Jit);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config {
            memstick_dir: Some("/base/memstick".to_string()),
            use_jit: Some(true),
            enable_sound: None,
        };

        let overlay = Config {
            memstick_dir: None,
            use_jit: None,
            enable_sound: Some(true),
        };

        base.merge(overlay);

        // memstick_dir unchanged (overlay was None)
        assert_eq!(base.memstick_dir, Some("/base/memstick".to_string()));
        // use_jit unchanged (overlay was None)
        assert_eq!(base.use_jit, Some(true));
        // enable_sound set from overlay
        assert_eq!(base.enable_sound, Some(true));
    }

    #[test]
    fn test_merge_preserves_flags_absent_from_later_file() {
        // A project-local file that only sets the memstick root must not
        // reset flags an earlier source enabled.
        let user: Config = toml::from_str("use_jit = true").unwrap();
        let local: Config = toml::from_str("memstick_dir = \"/mnt/ms\"").unwrap();

        let mut merged = Config::default();
        merged.merge(user);
        merged.merge(local);

        assert_eq!(merged.use_jit, Some(true));
        assert_eq!(merged.cpu_backend(), CpuBackend::Jit);
        assert_eq!(merged.memstick_dir, Some("/mnt/ms".to_string()));
    }

    #[test]
    fn test_sample_config_parses() {
        let sample = Config::sample_config();
        let config: Config = toml::from_str(&sample).expect("Sample config should parse");
        assert_eq!(config.memstick_dir, Some("/media/memstick".to_string()));
    }
}
