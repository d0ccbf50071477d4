//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori del codec immagini (formati corrotti, etc.)
//! - `InvalidPath`: File scoperto fuori dalla source root
//! - `Discovery`: Source root illeggibile durante la scansione
//! - `Timeout`: Singolo file bloccato oltre il tempo massimo
//! - `Validation`: Errori di validazione input
//!
//! Gli errori per singolo file vengono catturati dal runner e registrati
//! come `FailureRecord`; tutto il resto risale fino al boundary in `main`.

use std::path::PathBuf;

/// Custom error types for batch resizing
#[derive(thiserror::Error, Debug)]
pub enum RedimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Path {path} is not inside source root {source_root}")]
    InvalidPath { path: PathBuf, source_root: PathBuf },

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Processing timed out for {0}")]
    Timeout(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}
