//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::host::DXF_TRANSLATOR_ID;
use crate::core::naming::{FileNamePolicy, NameStyle, NamingPolicy};

/// Errors loading an explicitly requested config file
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    #[diagnostic(code(sheetdxf::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    #[diagnostic(code(sheetdxf::config::parse))]
    Parse { path: PathBuf, message: String },
}

/// Exporter configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory DXF files are written to (default: the user's desktop)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Identifier of the DXF translator to look up in the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_id: Option<String>,

    /// Handling of part names that are not valid file names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_names: Option<FileNamePolicy>,

    /// Include thickness and count in file names, or not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_style: Option<NameStyle>,
}

impl Config {
    /// Load configuration from the global config file, silently skipping
    /// a missing or unreadable file
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sheetdxf/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        config
    }

    /// Load the global config, then layer an explicit file on top
    pub fn load_with(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load();
        config.merge(Self::from_file(path)?);
        Ok(config)
    }

    /// Parse a single config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sheetdxf")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.translator_id.is_some() {
            self.translator_id = other.translator_id;
        }
        if other.file_names.is_some() {
            self.file_names = other.file_names;
        }
        if other.name_style.is_some() {
            self.name_style = other.name_style;
        }
    }

    /// Output directory: configured path, else the desktop, else home
    pub fn output_dir(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.output_dir {
            return Some(dir.clone());
        }

        let dirs = directories::UserDirs::new()?;
        Some(
            dirs.desktop_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dirs.home_dir().to_path_buf()),
        )
    }

    pub fn translator_id(&self) -> &str {
        self.translator_id.as_deref().unwrap_or(DXF_TRANSLATOR_ID)
    }

    pub fn naming(&self) -> NamingPolicy {
        NamingPolicy {
            style: self.name_style.unwrap_or_default(),
            file_names: self.file_names.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.translator_id(), DXF_TRANSLATOR_ID);
        assert_eq!(config.naming(), NamingPolicy::default());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            output_dir: Some(PathBuf::from("/a")),
            name_style: Some(NameStyle::Minimal),
            ..Default::default()
        };
        base.merge(Config {
            output_dir: Some(PathBuf::from("/b")),
            ..Default::default()
        });
        assert_eq!(base.output_dir, Some(PathBuf::from("/b")));
        assert_eq!(base.name_style, Some(NameStyle::Minimal));
    }

    #[test]
    fn test_configured_output_dir_wins() {
        let config = Config {
            output_dir: Some(PathBuf::from("/srv/dxf")),
            ..Default::default()
        };
        assert_eq!(config.output_dir(), Some(PathBuf::from("/srv/dxf")));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheetdxf.yaml");
        std::fs::write(
            &path,
            "output_dir: /tmp/out\nfile_names: reject\nname_style: minimal\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.naming().file_names, FileNamePolicy::Reject);
        assert_eq!(config.naming().style, NameStyle::Minimal);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempdir().unwrap();
        let missing = Config::from_file(&dir.path().join("nope.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "file_names: sometimes\n").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));
    }
}
