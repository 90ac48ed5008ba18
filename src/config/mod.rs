use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Console configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Console pane settings
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Editor pane settings
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Console pane settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConsoleConfig {
    /// Prompt appended after each result
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Editor pane share of the width, in percent
    #[serde(default = "default_split_percent")]
    pub split_percent: u16,
}

/// Editor pane settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Tab size
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Show line numbers
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,
}

// Default values
fn default_prompt() -> String {
    "$ ".to_string()
}
fn default_split_percent() -> u16 {
    45
}
fn default_tab_size() -> usize {
    4
}
fn default_show_line_numbers() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            split_percent: default_split_percent(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            show_line_numbers: default_show_line_numbers(),
        }
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// The config
    config: Config,

    /// The path to the config file
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager
    pub fn new(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");

        Self {
            config: Config::default(),
            config_path,
        }
    }

    /// Load the config
    pub fn load(&mut self) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Load config if it exists, otherwise use defaults
        if self.config_path.exists() {
            let config_str = fs::read_to_string(&self.config_path)?;
            self.config = serde_json::from_str(&config_str)
                .map_err(|e| anyhow!("Failed to parse config: {}", e))?;
        }

        Ok(())
    }

    /// Save the config
    pub fn save(&self) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_str)?;
        Ok(())
    }

    /// Get the config
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the config
    pub fn get_config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
