//! # Batch Runner Module
//!
//! Questo è il modulo principale che orchestra tutto il batch.
//!
//! ## Responsabilità:
//! - Applicazione del limite di tentativi (modalità `--test`)
//! - Distribuzione del lavoro su un worker pool con semaforo
//! - Isolamento degli errori per singolo file (il batch continua sempre)
//! - Un tick di progresso per ogni file tentato, qualunque sia l'esito
//! - Aggregazione del `RunResult` in un unico punto (single writer)
//!
//! ## Pipeline per file:
//! 1. PathResolver: calcolo della destinazione speculare
//! 2. FileStager: copia, resize su staging con deadline del codec,
//!    promozione atomica
//!
//! ## Error handling:
//! Gli errori per singolo file vengono loggati con il path di contesto,
//! registrati come `FailureRecord` e non bloccano gli altri file. Tutto
//! ciò che accade fuori dal boundary per-file (spawn, join, semaforo)
//! risale come errore fatale al chiamante.

use crate::{
    config::Config,
    path_resolver::PathResolver,
    progress::ProgressManager,
    stager::{FileStager, StageOutcome},
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// One recorded per-file failure
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate outcome of one batch run
#[derive(Debug, Default)]
pub struct RunResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
}

impl RunResult {
    fn add_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    fn add_failure(&mut self, path: PathBuf, error: &anyhow::Error) {
        self.attempted += 1;
        self.failed += 1;
        self.failures.push(FailureRecord {
            path,
            error: format!("{:#}", error),
        });
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Succeeded: {} | Failed: {}",
            self.attempted, self.succeeded, self.failed
        )
    }
}

/// Drives the whole batch over the discovered images
pub struct BatchRunner {
    config: Config,
}

impl BatchRunner {
    /// Create a runner for a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process every discovered image, isolating per-file failures.
    ///
    /// The limit counts attempts, not successes: with `limit` set the
    /// first `limit` images in discovery order are attempted and nothing
    /// else is touched.
    pub async fn run(&self, mut images: Vec<PathBuf>) -> Result<RunResult> {
        if let Some(limit) = self.config.limit {
            if images.len() > limit {
                info!(
                    "🧪 Test mode: limiting run to {} of {} discovered images",
                    limit,
                    images.len()
                );
                images.truncate(limit);
            }
        }

        if images.is_empty() {
            info!("No images to process");
            return Ok(RunResult::default());
        }

        info!(
            "Processing {} images from {} to {}",
            images.len(),
            self.config.source_root.display(),
            self.config.dest_root.display()
        );

        let progress = ProgressManager::new(images.len() as u64);
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks = Vec::new();

        for image_path in images {
            let permit = semaphore.clone().acquire_owned().await?;
            let source_root = self.config.source_root.clone();
            let dest_root = self.config.dest_root.clone();
            let bound = self.config.bound;
            let progress = progress.clone();

            let task = tokio::spawn(async move {
                let _permit = permit; // Keep permit alive

                let result =
                    Self::process_one(&source_root, &dest_root, bound, &image_path).await;

                let name = image_path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                let message = match &result {
                    Ok(StageOutcome::Resized { width, height }) => {
                        format!("✅ {}: {}x{}", name, width, height)
                    }
                    Ok(_) => format!("✅ {}: copied", name),
                    Err(_) => format!("❌ {}: error", name),
                };
                progress.update(&message);

                (image_path, result)
            });

            tasks.push(task);
        }

        // Single writer: every counter update happens in this loop only
        let mut result = RunResult::default();
        for task in tasks {
            let (path, outcome) = task.await?;
            match outcome {
                Ok(stage_outcome) => {
                    debug!("{}: {:?}", path.display(), stage_outcome);
                    result.add_success();
                }
                Err(e) => {
                    error!("Error for {}: {:#}", path.display(), e);
                    result.add_failure(path, &e);
                }
            }
        }

        progress.finish(&result.format_summary());
        info!("{}", result.format_summary());

        Ok(result)
    }

    /// The per-file pipeline: map the destination, then stage
    async fn process_one(
        source_root: &Path,
        dest_root: &Path,
        bound: crate::config::ResizeBound,
        input: &Path,
    ) -> Result<StageOutcome> {
        info!("Processing image: {}", input.display());

        let dest = PathResolver::map(source_root, dest_root, input)?;
        FileStager::stage(input, &dest, bound).await
    }
}
