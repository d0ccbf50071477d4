//! # Redim Library
//!
//! Questo è il modulo principale della libreria che espone le API pubbliche.
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per le diverse operazioni
//! - `file_manager`: Discovery ricorsiva delle immagini
//! - `path_resolver`: Mapping source → destination path
//! - `resize`: Contratto di resize fit-inside sul codec `image`
//! - `stager`: Scrittura a due fasi stage-and-promote per file
//! - `runner`: Orchestratore del batch con isolamento degli errori
//! - `progress`: Progress bar del batch
//! - `prompt`: Gate di conferma dell'operatore
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use redim::{BatchRunner, Config, FileManager};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut config = Config {
//!     source_root: "/photos".into(),
//!     dest_root: "/resized".into(),
//!     ..Default::default()
//! };
//! config.validate()?;
//!
//! let images = FileManager::find_image_files(&config.source_root)?;
//! let result = BatchRunner::new(config).run(images).await?;
//! println!("{}", result.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod path_resolver;
pub mod progress;
pub mod prompt;
pub mod resize;
pub mod runner;
pub mod stager;

pub use config::{Config, ResizeBound};
pub use error::RedimError;
pub use file_manager::FileManager;
pub use runner::{BatchRunner, FailureRecord, RunResult};
pub use stager::{FileStager, StageOutcome};
