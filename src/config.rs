//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri del run
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Canonicalizza le root directory una sola volta, prima di ogni I/O
//!
//! ## Parametri di configurazione:
//! - `source_root`: Directory da cui leggere le immagini (deve esistere)
//! - `dest_root`: Directory in cui scrivere le immagini (deve esistere)
//! - `bound`: Dimensioni massime del resize (default: 1200x1200)
//! - `limit`: Numero massimo di file da processare (None = tutti)
//! - `workers`: Numero di worker paralleli (default: 4)
//!
//! ## Validazione:
//! - Controlla che source_root e dest_root esistano e siano directory
//! - Controlla che le dimensioni massime siano > 0
//! - Controlla che workers sia > 0
//!
//! ## Esempio:
//! ```rust,no_run
//! use redim::{Config, ResizeBound};
//! # fn main() -> anyhow::Result<()> {
//! let mut config = Config {
//!     source_root: "/photos".into(),
//!     dest_root: "/resized".into(),
//!     bound: ResizeBound::new(800, 800),
//!     ..Default::default()
//! };
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::RedimError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum bounding box for one run, fit-inside semantics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResizeBound {
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
}

impl ResizeBound {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    /// True when an image of the given size already fits inside the bound
    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

impl Default for ResizeBound {
    fn default() -> Self {
        // Same bound the tool has always shipped with
        Self::new(1200, 1200)
    }
}

/// Configuration for one resize run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory tree to read images from
    pub source_root: PathBuf,
    /// Directory tree to mirror resized images into
    pub dest_root: PathBuf,
    /// Maximum output dimensions (fit-inside, never upscales)
    pub bound: ResizeBound,
    /// Stop after this many attempts (None = process everything)
    pub limit: Option<usize>,
    /// Number of parallel workers
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::new(),
            dest_root: PathBuf::new(),
            bound: ResizeBound::default(),
            limit: None,
            workers: 4,
        }
    }
}

impl Config {
    /// Validate configuration parameters and canonicalize both roots.
    ///
    /// Must be called before any file I/O: every later path computation
    /// assumes the roots are absolute and free of symlink indirection.
    pub fn validate(&mut self) -> Result<()> {
        if !self.source_root.exists() {
            return Err(RedimError::Validation(format!(
                "Source directory does not exist: {}",
                self.source_root.display()
            ))
            .into());
        }
        if !self.source_root.is_dir() {
            return Err(RedimError::Validation(format!(
                "Source path is not a directory: {}",
                self.source_root.display()
            ))
            .into());
        }

        if !self.dest_root.exists() {
            return Err(RedimError::Validation(format!(
                "Destination directory does not exist: {}",
                self.dest_root.display()
            ))
            .into());
        }
        if !self.dest_root.is_dir() {
            return Err(RedimError::Validation(format!(
                "Destination path is not a directory: {}",
                self.dest_root.display()
            ))
            .into());
        }

        if self.bound.max_width == 0 || self.bound.max_height == 0 {
            return Err(RedimError::Validation("Resize bound must be at least 1x1".into()).into());
        }

        if self.workers == 0 {
            return Err(
                RedimError::Validation("Number of workers must be greater than 0".into()).into(),
            );
        }

        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(RedimError::Validation("Limit must be greater than 0".into()).into());
            }
        }

        self.source_root = self.source_root.canonicalize()?;
        self.dest_root = self.dest_root.canonicalize()?;

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid_config(source: &TempDir, dest: &TempDir) -> Config {
        Config {
            source_root: source.path().to_path_buf(),
            dest_root: dest.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bound_contains() {
        let bound = ResizeBound::new(1200, 1200);
        assert!(bound.contains(1200, 1200));
        assert!(bound.contains(400, 300));
        assert!(!bound.contains(1201, 600));
        assert!(!bound.contains(600, 1201));
    }

    #[test]
    fn test_config_validation() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        let mut config = valid_config(&source, &dest);
        assert!(config.validate().is_ok());

        let mut config = valid_config(&source, &dest);
        config.source_root = source.path().join("missing");
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RedimError>(),
            Some(RedimError::Validation(_))
        ));

        let mut config = valid_config(&source, &dest);
        config.dest_root = dest.path().join("missing");
        assert!(config.validate().is_err());

        let mut config = valid_config(&source, &dest);
        config.bound = ResizeBound::new(0, 1200);
        assert!(config.validate().is_err());

        let mut config = valid_config(&source, &dest);
        config.workers = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config(&source, &dest);
        config.limit = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_canonicalizes_roots() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        let mut config = valid_config(&source, &dest);
        config.validate().unwrap();

        assert_eq!(config.source_root, source.path().canonicalize().unwrap());
        assert_eq!(config.dest_root, dest.path().canonicalize().unwrap());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.bound, ResizeBound::new(1200, 1200));
        assert_eq!(config.workers, 4);
        assert!(config.limit.is_none());
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            source_root: "/photos".into(),
            dest_root: "/resized".into(),
            bound: ResizeBound::new(800, 600),
            limit: Some(10),
            workers: 8,
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config.source_root, PathBuf::from("/photos"));
        assert_eq!(loaded_config.bound, ResizeBound::new(800, 600));
        assert_eq!(loaded_config.limit, Some(10));
        assert_eq!(loaded_config.workers, 8);
    }
}
