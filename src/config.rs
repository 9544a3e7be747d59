//! Process configuration resolved from the command line

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::utils::ensure_dir;

/// Where catalogs are read from and where doctor workbooks are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub in_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            in_dir: PathBuf::from("."),
            out_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// With no directories both default to the working directory. A single
    /// directory serves as input and output. Given directories are made
    /// absolute and created if absent.
    pub fn resolve(in_dir: Option<&Path>, out_dir: Option<&Path>) -> Result<Self> {
        let config = match (in_dir, out_dir) {
            (None, None) => Self::default(),
            (Some(dir), None) | (None, Some(dir)) => {
                let dir = ensure_dir(dir)?;
                Self {
                    in_dir: dir.clone(),
                    out_dir: dir,
                }
            }
            (Some(in_dir), Some(out_dir)) => Self {
                in_dir: ensure_dir(in_dir)?,
                out_dir: ensure_dir(out_dir)?,
            },
        };
        info!(
            "Reading catalogs from {}, writing cards to {}",
            config.in_dir.display(),
            config.out_dir.display()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_arguments_uses_current_directory() {
        let config = AppConfig::resolve(None, None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_single_directory_is_input_and_output() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cards");

        let config = AppConfig::resolve(Some(&dir), None).unwrap();

        assert!(dir.is_dir());
        assert!(config.in_dir.is_absolute());
        assert_eq!(config.in_dir, config.out_dir);
    }

    #[test]
    fn test_two_directories_are_created() {
        let temp = TempDir::new().unwrap();
        let in_dir = temp.path().join("in");
        let out_dir = temp.path().join("nested").join("out");

        let config = AppConfig::resolve(Some(&in_dir), Some(&out_dir)).unwrap();

        assert!(out_dir.is_dir());
        assert!(config.in_dir.ends_with("in"));
        assert!(config.out_dir.ends_with("out"));
    }
}
