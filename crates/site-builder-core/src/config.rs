use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_CATALOG_FILE;
use crate::error::{Result, SiteBuilderError};

const CONFIG_FILE: &str = "config.toml";
const BASE_DIR_NAME: &str = ".site-builder";
const DEFAULT_RENDER_OUTPUT: &str = "site/index.html";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# site-builder configuration file
# Location: ~/.site-builder/config.toml

[catalog]
# Catalog document edited by the CLI and the desktop editor.
# Relative paths are resolved against the current directory.
# Overridden by --catalog or SITE_BUILDER_CATALOG.
path = "config.json"

[render]
# Where `site-builder render` writes the generated page
output = "site/index.html"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_FILE)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
    #[serde(default = "default_render_output")]
    pub output: PathBuf,
}

fn default_render_output() -> PathBuf {
    PathBuf::from(DEFAULT_RENDER_OUTPUT)
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: default_render_output(),
        }
    }
}

impl Config {
    /// `~/.site-builder`
    pub fn default_base_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(BASE_DIR_NAME))
            .ok_or(SiteBuilderError::HomeNotFound)
    }

    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| SiteBuilderError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content =
            toml::to_string_pretty(self).map_err(|e| SiteBuilderError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog.path" => Some(self.catalog.path.display().to_string()),
            "render.output" => Some(self.render.output.display().to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "catalog.path" => {
                self.catalog.path = PathBuf::from(value);
                Ok(())
            }
            "render.output" => {
                self.render.output = PathBuf::from(value);
                Ok(())
            }
            _ => Err(SiteBuilderError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["catalog.path", "render.output"]
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}
