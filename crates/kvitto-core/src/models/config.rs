//! Configuration structures for receipt extraction.

use serde::{Deserialize, Serialize};

/// Main configuration for the kvitto pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KvittoConfig {
    /// Known passenger roster.
    pub roster: RosterConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// The fixed set of recognized passenger names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Names matched case-insensitively; the canonical spelling given here
    /// is what ends up in the output.
    pub passengers: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            passengers: ["Fredrik", "Viggo", "Agne", "Giedre", "Nadine", "Leona"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Also recognize English long-form dates ("4 July 2025").
    pub english_dates: bool,

    /// Fall back to relaxed amount patterns when no labeled total is found.
    pub relaxed_amounts: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            english_dates: true,
            relaxed_amounts: true,
        }
    }
}

impl KvittoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
