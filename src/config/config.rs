use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sorting::{ColumnSortingSettings, SortState};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub column_sorting: ColumnSortingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSortingConfig {
    /// Sort empty cells along with the rest instead of keeping them last
    pub sort_empty_cells: bool,

    /// Show the sort direction indicator in column headers
    pub indicator: bool,

    /// Clicking a column header sorts by it
    pub header_action: bool,

    /// Sort applied when the grid is created, highest priority first
    pub initial_config: Vec<SortState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is not set, e.g. "info" or "column_sorting=trace"
    pub level: String,

    /// Number of log lines kept in memory
    pub buffer_capacity: usize,
}

impl Default for ColumnSortingConfig {
    fn default() -> Self {
        Self {
            sort_empty_cells: false,
            indicator: true,
            header_action: true,
            initial_config: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            buffer_capacity: 1000,
        }
    }
}

impl ColumnSortingConfig {
    /// Settings to merge into a manager's column properties
    pub fn to_settings(&self) -> ColumnSortingSettings {
        ColumnSortingSettings::new()
            .sort_empty_cells(self.sort_empty_cells)
            .indicator(self.indicator)
            .header_action(self.header_action)
    }
}

impl Config {
    /// Load config from the default location, writing defaults if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("column-sorting").join("config.toml"))
    }

    /// Write the commented default config to `path`, creating parent dirs
    pub fn write_default_with_comments(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        fs::write(path, Self::create_default_with_comments())
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Column sorting configuration
# Location: ~/.config/column-sorting/config.toml (Linux)

[column_sorting]
# Sort empty cells with the other values instead of keeping them at the end
sort_empty_cells = false

# Show the sort direction indicator in column headers
indicator = true

# Clicking a column header changes the sort
header_action = true

# Sort applied at startup, highest priority first
# [[column_sorting.initial_config]]
# column = 0
# sort_order = "asc"

[logging]
# Used when RUST_LOG is not set
level = "info"

# Log lines kept in memory for the debug view
buffer_capacity = 1000
"#
        .to_string()
    }
}
