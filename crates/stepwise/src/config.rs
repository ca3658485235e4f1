//! Configuration file support for stepwise.
//!
//! All stepwise data is stored in a `.stepwise/` directory:
//! - `.stepwise/config.toml` - Configuration file
//! - `.stepwise/logs/` - Log files written during interactive playback
//!
//! Config discovery searches for `.stepwise/config.toml` starting from the
//! current directory and walking up to parent directories.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// The stepwise data directory name.
pub const STEPWISE_DIR: &str = ".stepwise";
/// The config file name within the stepwise directory.
pub const CONFIG_FILE: &str = "config.toml";

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stepwise_algo::{AMOUNT_RANGE, BOARD_SIZE_RANGE, Glyphs};

/// Written by `stepwise init`.
pub const DEFAULT_CONFIG: &str = r#"# stepwise configuration

[playback]
interval_ms = 1500   # Auto-play delay between steps
glyphs = "unicode"   # Options: "unicode", "ascii"

# Used when --coins / --amount are not given
[coins]
default_coins = [1, 3, 4]
default_amount = 6   # 1 to 20

# Used when --size is not given
[queens]
default_size = 4     # 4 to 8
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Playback settings.
    pub playback: PlaybackConfig,
    /// Coin-change defaults.
    pub coins: CoinsConfig,
    /// N-Queens defaults.
    pub queens: QueensConfig,
}

/// Character set for boards and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    #[default]
    Unicode,
    Ascii,
}

impl GlyphSet {
    pub fn glyphs(self) -> Glyphs {
        match self {
            GlyphSet::Unicode => Glyphs::UNICODE,
            GlyphSet::Ascii => Glyphs::ASCII,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Auto-play interval in milliseconds.
    pub interval_ms: u64,
    pub glyphs: GlyphSet,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1500,
            glyphs: GlyphSet::Unicode,
        }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoinsConfig {
    pub default_coins: Vec<u32>,
    pub default_amount: usize,
}

impl Default for CoinsConfig {
    fn default() -> Self {
        Self {
            default_coins: vec![1, 3, 4],
            default_amount: 6,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueensConfig {
    pub default_size: usize,
}

impl Default for QueensConfig {
    fn default() -> Self {
        Self { default_size: 4 }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Find and load configuration from current or parent directories.
    pub fn find_and_load() -> Result<Option<(Self, PathBuf)>> {
        let current = std::env::current_dir()?;
        Self::find_and_load_from(&current)
    }

    /// Find and load configuration starting from a specific directory.
    ///
    /// Returns the config and the `.stepwise` directory it was found in.
    pub fn find_and_load_from(start: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start.to_path_buf();

        loop {
            let stepwise_dir = dir.join(STEPWISE_DIR);
            let config_path = stepwise_dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config, stepwise_dir)));
            }

            if !dir.pop() {
                break;
            }
        }

        Ok(None)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Validate the configuration.
    ///
    /// Returns a list of validation errors if any are found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.playback.interval_ms == 0 {
            errors.push(ConfigValidationError {
                field: "playback.interval_ms".to_string(),
                message: "Interval must be greater than zero.".to_string(),
            });
        }

        if self.coins.default_coins.is_empty() {
            errors.push(ConfigValidationError {
                field: "coins.default_coins".to_string(),
                message: "At least one coin is required.".to_string(),
            });
        }

        if self.coins.default_coins.contains(&0) {
            errors.push(ConfigValidationError {
                field: "coins.default_coins".to_string(),
                message: "Coin values must be positive.".to_string(),
            });
        }

        if !AMOUNT_RANGE.contains(&self.coins.default_amount) {
            errors.push(ConfigValidationError {
                field: "coins.default_amount".to_string(),
                message: format!(
                    "Amount {} out of range. Expected {} to {}.",
                    self.coins.default_amount,
                    AMOUNT_RANGE.start(),
                    AMOUNT_RANGE.end()
                ),
            });
        }

        if !BOARD_SIZE_RANGE.contains(&self.queens.default_size) {
            errors.push(ConfigValidationError {
                field: "queens.default_size".to_string(),
                message: format!(
                    "Board size {} out of range. Expected {} to {}.",
                    self.queens.default_size,
                    BOARD_SIZE_RANGE.start(),
                    BOARD_SIZE_RANGE.end()
                ),
            });
        }

        errors
    }
}
