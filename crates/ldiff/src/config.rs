//! Configuration file support for ldiff
//!
//! Config file location: `~/.config/ldiff/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [engine]
//! modify_threshold = 0.3
//! conflict_threshold = 0.7
//! max_section_len = 20
//! collapse_after = 5
//!
//! [output]
//! format = "text"
//! color = "auto"
//! expand = false
//! line_numbers = true
//!
//! [input]
//! max_bytes = 16777216   # 0 disables the limit
//! ```

use ldiff_core::align::{CONFLICT_THRESHOLD, MODIFY_THRESHOLD};
use ldiff_core::section::{COLLAPSE_AFTER, MAX_SECTION_LEN};
use ldiff_core::{DiffEngine, SectionLimits, Thresholds};
use serde::Deserialize;
use std::path::PathBuf;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Colored, folded terminal view
    #[default]
    Text,
    /// Records, sections and stats as JSON
    Json,
    /// Plain-text section report
    Report,
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Engine tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Similarity above which a differing pair counts as modified
    pub modify_threshold: f64,
    /// Similarity below which a modification is flagged as a conflict
    pub conflict_threshold: f64,
    /// Maximum records per section
    pub max_section_len: usize,
    /// Unchanged sections longer than this start collapsed
    pub collapse_after: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            modify_threshold: MODIFY_THRESHOLD,
            conflict_threshold: CONFLICT_THRESHOLD,
            max_section_len: MAX_SECTION_LEN,
            collapse_after: COLLAPSE_AFTER,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Format,
    pub color: ColorChoice,
    /// Show collapsed sections expanded
    pub expand: bool,
    /// Show the old/new line number gutter
    pub line_numbers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::Text,
            color: ColorChoice::Auto,
            expand: false,
            line_numbers: true,
        }
    }
}

/// Input limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Largest accepted input per side, in bytes (0 disables the limit)
    pub max_bytes: Option<u64>,
}

impl InputConfig {
    pub fn limit(&self) -> Option<u64> {
        self.max_bytes.filter(|&n| n > 0)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: Some(16 * 1024 * 1024),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub input: InputConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG_CONFIG_HOME (if set)
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("ldiff").join("config.toml"));
        }

        // 2. ~/.config/ldiff/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("ldiff").join("config.toml"));
        }

        // 3. Platform-specific config dir (~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("ldiff").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from the first existing path
    /// Returns default config if no file exists or it can't be parsed
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::debug!("no config file found, using defaults");
            return Self::default();
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read config: {e}");
                return Self::default();
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config.validated()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to parse config: {e}");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Replace out-of-range engine values with their defaults
    pub fn validated(mut self) -> Self {
        let defaults = EngineConfig::default();
        let engine = &mut self.engine;

        if !(0.0..=1.0).contains(&engine.modify_threshold) {
            tracing::warn!(
                value = engine.modify_threshold,
                "modify_threshold must be within 0..=1, using default"
            );
            engine.modify_threshold = defaults.modify_threshold;
        }
        if !(0.0..=1.0).contains(&engine.conflict_threshold) {
            tracing::warn!(
                value = engine.conflict_threshold,
                "conflict_threshold must be within 0..=1, using default"
            );
            engine.conflict_threshold = defaults.conflict_threshold;
        }
        if engine.modify_threshold > engine.conflict_threshold {
            tracing::warn!(
                modify = engine.modify_threshold,
                conflict = engine.conflict_threshold,
                "modify_threshold exceeds conflict_threshold, using defaults"
            );
            engine.modify_threshold = defaults.modify_threshold;
            engine.conflict_threshold = defaults.conflict_threshold;
        }
        if engine.max_section_len == 0 {
            tracing::warn!("max_section_len must be at least 1");
            engine.max_section_len = 1;
        }

        self
    }

    /// Build a diff engine from the engine section
    pub fn engine(&self) -> DiffEngine {
        DiffEngine::new()
            .with_thresholds(Thresholds {
                modify: self.engine.modify_threshold,
                conflict: self.engine.conflict_threshold,
            })
            .with_section_limits(SectionLimits {
                max_len: self.engine.max_section_len,
                collapse_after: self.engine.collapse_after,
            })
    }
}
