//! User configuration
//!
//! All tunables live in one [`Config`] that loads from TOML. Every field has
//! a default, so an empty file (or no file at all) behaves like
//! `Config::default()`.
//!
//! ```toml
//! [playback]
//! step_ms = 300
//!
//! [limits]
//! bst = 20
//! history = 50
//! ```
//!
//! Only the terminal host reads this. Library types take plain parameters
//! (a speed, a capacity) and never see the config.

use crate::structures::StructureKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub input: InputConfig,
    pub limits: LimitsConfig,
    pub log: LogConfig,
}

/// Autoplay timing, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub step_ms: u64,
    pub min_step_ms: u64,
    pub max_step_ms: u64,
    /// Change applied by one faster/slower key press
    pub speed_step_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            step_ms: 500,
            min_step_ms: 50,
            max_step_ms: 2000,
            speed_step_ms: 50,
        }
    }
}

impl PlaybackConfig {
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Clamp a requested step interval into the configured bounds
    pub fn clamp(&self, ms: u64) -> Duration {
        Duration::from_millis(ms.clamp(self.min_step_ms, self.max_step_ms))
    }
}

/// Random input generation for algorithm runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub default_len: usize,
    pub min_value: i32,
    pub max_value: i32,
    pub max_len: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            default_len: 10,
            min_value: 1,
            max_value: 100,
            max_len: 20,
        }
    }
}

impl InputConfig {
    /// Refuse explicit input longer than `max_len`
    pub fn check_len(&self, len: usize) -> Result<(), String> {
        if len > self.max_len {
            return Err(format!(
                "input has {} values, input.max_len allows at most {}",
                len, self.max_len
            ));
        }
        Ok(())
    }
}

/// Capacity of each live structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub stack: usize,
    pub queue: usize,
    pub linked_list: usize,
    pub doubly_linked_list: usize,
    pub bst: usize,
    pub graph: usize,
    /// Undo tape entries kept per session, oldest dropped first
    pub history: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            stack: 10,
            queue: 10,
            linked_list: 10,
            doubly_linked_list: 10,
            bst: 15,
            graph: 10,
            history: 100,
        }
    }
}

impl LimitsConfig {
    pub fn capacity(&self, kind: StructureKind) -> usize {
        match kind {
            StructureKind::Stack => self.stack,
            StructureKind::Queue => self.queue,
            StructureKind::LinkedList => self.linked_list,
            StructureKind::DoublyLinkedList => self.doubly_linked_list,
            StructureKind::Bst => self.bst,
            StructureKind::Graph => self.graph,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file used while the TUI owns the terminal
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: PathBuf::from("algotty.log"),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_file(path)?;
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems));
        }
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Problems with the current values; empty means valid
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let p = &self.playback;
        if p.min_step_ms == 0 {
            errors.push("playback.min_step_ms must be > 0".into());
        }
        if p.min_step_ms > p.max_step_ms {
            errors.push(format!(
                "playback.min_step_ms ({}) must not exceed playback.max_step_ms ({})",
                p.min_step_ms, p.max_step_ms
            ));
        }
        if !(p.min_step_ms..=p.max_step_ms).contains(&p.step_ms) {
            errors.push(format!(
                "playback.step_ms must be in [{}, {}], got {}",
                p.min_step_ms, p.max_step_ms, p.step_ms
            ));
        }
        if p.speed_step_ms == 0 {
            errors.push("playback.speed_step_ms must be > 0".into());
        }

        let i = &self.input;
        if i.min_value > i.max_value {
            errors.push(format!(
                "input.min_value ({}) must not exceed input.max_value ({})",
                i.min_value, i.max_value
            ));
        }
        if i.max_len == 0 {
            errors.push("input.max_len must be > 0".into());
        }
        if i.default_len == 0 || i.default_len > i.max_len {
            errors.push(format!(
                "input.default_len must be in [1, {}], got {}",
                i.max_len, i.default_len
            ));
        }

        for (name, value) in [
            ("stack", self.limits.stack),
            ("queue", self.limits.queue),
            ("linked_list", self.limits.linked_list),
            ("doubly_linked_list", self.limits.doubly_linked_list),
            ("bst", self.limits.bst),
            ("graph", self.limits.graph),
            ("history", self.limits.history),
        ] {
            if value == 0 {
                errors.push(format!("limits.{} must be > 0", name));
            }
        }

        errors
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[source] std::io::Error),

    #[error("could not parse config: {0}")]
    Toml(#[source] toml::de::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
