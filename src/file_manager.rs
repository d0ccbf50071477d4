//! # File Discovery Module
//!
//! Questo modulo gestisce la discovery ricorsiva delle immagini da processare.
//!
//! ## Responsabilità:
//! - Scansione ricorsiva della source root con `walkdir`
//! - Filtro per estensione sulla allow-list di formati immagine
//! - Ordine di visita deterministico (ordinato per nome file)
//! - Distinzione tra formati raster e vettoriali (SVG)
//!
//! ## Formati supportati:
//! - **Raster**: JPG, JPEG, PNG, GIF, WebP
//! - **Vettoriali**: SVG (copiati senza resize, mai passati al codec)
//!
//! Il match sulle estensioni è case-insensitive: `.JPG` e `.jpg` sono
//! equivalenti, su qualunque filesystem.

use crate::error::RedimError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers image files and classifies them by extension
pub struct FileManager;

impl FileManager {
    /// Find all supported image files under a source root.
    ///
    /// The walk is sorted by file name at every level, so the returned
    /// sequence is deterministic for a given filesystem snapshot. The list
    /// is materialized once; the tree is never re-scanned mid-run.
    pub fn find_image_files(source_root: &Path) -> Result<Vec<PathBuf>, RedimError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                RedimError::Discovery(format!(
                    "Failed to read {}: {}",
                    source_root.display(),
                    e
                ))
            })?;

            if entry.file_type().is_file() && Self::is_supported_format(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }

    /// Check if a file extension is on the image allow-list
    pub fn is_supported_format(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(
                ext_lower.as_str(),
                "jpg" | "jpeg" | "png" | "gif" | "webp" | "svg"
            )
        } else {
            false
        }
    }

    /// Check if a file is a vector image (copied as-is, never resized)
    pub fn is_vector(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            ext.to_string_lossy().to_lowercase() == "svg"
        } else {
            false
        }
    }
}
