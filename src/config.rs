// src/config.rs

//! Defines the configuration structures for the text core.
//!
//! The structs deserialize from a JSON document. Every section carries
//! `#[serde(default)]`, so a partial file only overrides what it names and an
//! empty object yields the defaults below.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for the text core.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where the bulk Unicode data tables are read from.
    pub unicode: UnicodeDataConfig,
    /// Escape-sequence decoder behavior.
    pub decoder: DecoderConfig,
    /// Scrollback history settings.
    pub scrollback: ScrollbackConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

// --- Unicode Data Configuration ---

/// Paths of the two bulk Unicode data files the rune table is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UnicodeDataConfig {
    /// `UnicodeData.txt` from the Unicode Character Database.
    pub unicode_data: PathBuf,
    /// `ArabicShaping.txt` from the Unicode Character Database.
    pub arabic_shaping: PathBuf,
}

impl Default for UnicodeDataConfig {
    fn default() -> Self {
        UnicodeDataConfig {
            unicode_data: PathBuf::from("UnicodeData.txt"),
            arabic_shaping: PathBuf::from("ArabicShaping.txt"),
        }
    }
}

// --- Decoder Configuration ---

/// Settings for the ANSI escape-sequence decoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecoderConfig {
    /// If true, an SGR argument containing a non-digit byte is rejected.
    /// If false, non-digit bytes are skipped and the remaining digits are
    /// used, which is what most terminal output in the wild expects.
    pub strict_sgr_digits: bool,
    /// Upper bound on bytes held back while waiting for the rest of an
    /// escape sequence split across reads.
    pub max_pending_bytes: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            strict_sgr_digits: false,
            max_pending_bytes: 256,
        }
    }
}

// --- Scrollback Configuration ---

/// Defines settings for the scrollback history buffer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollbackConfig {
    /// Number of rows kept in history.
    pub capacity: usize,
}

impl Default for ScrollbackConfig {
    fn default() -> Self {
        ScrollbackConfig { capacity: 1000 }
    }
}
