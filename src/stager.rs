//! # File Staging Module
//!
//! Questo modulo implementa la scrittura a due fasi per ogni singolo file.
//!
//! ## Responsabilità:
//! - Creazione idempotente delle directory di destinazione
//! - Copia di sicurezza dei byte originali nella destinazione
//! - Resize verso un file di staging sibling, mai verso la destinazione
//! - Promozione atomica dello staging sopra la destinazione (`rename`)
//! - Pulizia di ogni residuo di staging in caso di errore
//!
//! ## Sequenza per file:
//! 1. `create_dir_all` sul parent della destinazione
//! 2. copia raw input → destinazione (copia di sicurezza)
//! 3. SVG: stop, la copia pass-through è il risultato finale
//! 4. resize della copia verso `.redim-<pid>-<nome>` (thread blocking,
//!    con deadline)
//! 5. `rename(staging, destinazione)`: atomico nella stessa directory
//!
//! ## Politica di fallimento:
//! Se il resize fallisce dopo la copia, la destinazione mantiene sempre la
//! copia non ridimensionata (meglio un file intero che nessun file) e lo
//! staging viene sempre rimosso. Nessun file di staging sopravvive mai a
//! una chiamata di `stage`, con o senza successo.
//!
//! ## Deadline del codec:
//! La deadline copre solo la chiamata al codec, mai la copia raw. Il lavoro
//! blocking non è interrompibile a metà, quindi allo scadere della deadline
//! lo stager attende comunque la fine della chiamata, scarta il risultato,
//! rimuove lo staging e riporta `Timeout`. La copia di sicurezza resta
//! nella destinazione, come per ogni altro fallimento del resize.
//!
//! Il prefisso di staging include il pid del processo, quindi due run
//! concorrenti sulla stessa destinazione non possono collidere.

use crate::config::ResizeBound;
use crate::error::RedimError;
use crate::file_manager::FileManager;
use crate::resize::{ImageResizer, ResizeOutcome};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

/// Reserved prefix for staging siblings; assumed never to occur in inputs
pub const STAGING_PREFIX: &str = ".redim-";

/// Conservative ceiling for one codec call; a resize that exceeds it is
/// discarded and reported as a per-file failure
pub const RESIZE_TIMEOUT: Duration = Duration::from_secs(180);

/// What staging did with one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Destination holds a freshly resized image
    Resized { width: u32, height: u32 },
    /// Image already fit the bound; destination holds an unchanged copy
    CopiedWithinBound { width: u32, height: u32 },
    /// Vector image; destination holds a pass-through copy
    CopiedVector,
}

/// Performs the two-phase stage-and-promote write for single files
pub struct FileStager;

impl FileStager {
    /// Stage one input into its destination path, resizing in place.
    ///
    /// Errors are returned with path context and never leave a staging
    /// file behind. After a resize failure the destination keeps the
    /// unresized safety copy.
    pub async fn stage(input: &Path, dest: &Path, bound: ResizeBound) -> Result<StageOutcome> {
        Self::stage_with_timeout(input, dest, bound, RESIZE_TIMEOUT).await
    }

    /// Same as [`stage`](Self::stage) with an explicit codec deadline.
    ///
    /// The deadline covers only the resize call, never the raw copy. The
    /// blocking codec work cannot be interrupted mid-call, so on elapse
    /// the stager waits for the call to finish, removes the staging file
    /// and reports a timeout; the staging cleanup guarantee holds on
    /// every return path.
    pub async fn stage_with_timeout(
        input: &Path,
        dest: &Path,
        bound: ResizeBound,
        timeout: Duration,
    ) -> Result<StageOutcome> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directories for {}", dest.display()))?;
        }

        fs::copy(input, dest)
            .await
            .with_context(|| format!("Failed to copy {} to {}", input.display(), dest.display()))?;
        info!("Copied {} -> {}", input.display(), dest.display());

        if FileManager::is_vector(input) {
            info!("Vector image, keeping pass-through copy: {}", dest.display());
            return Ok(StageOutcome::CopiedVector);
        }

        let staging = Self::staging_path(dest)?;
        let resizer = ImageResizer::new(bound);
        let mut handle = {
            let (src, dst) = (dest.to_path_buf(), staging.clone());
            tokio::task::spawn_blocking(move || resizer.resize_to_fit(&src, &dst))
        };

        let joined = match tokio::time::timeout(timeout, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                // The codec call cannot be cancelled; wait it out so the
                // staging file can be removed before returning.
                let _ = handle.await;
                let _ = fs::remove_file(&staging).await;
                warn!(
                    "Resize timed out for {}; destination keeps the unresized copy",
                    dest.display()
                );
                return Err(RedimError::Timeout(input.to_path_buf()).into());
            }
        };

        let outcome = match joined.context("Resize task panicked") {
            Ok(Ok(o)) => o,
            Ok(Err(e)) => {
                let _ = fs::remove_file(&staging).await;
                warn!(
                    "Resize failed for {}; destination keeps the unresized copy",
                    dest.display()
                );
                return Err(anyhow::Error::from(e)
                    .context(format!("Failed to resize {}", dest.display())));
            }
            Err(e) => {
                let _ = fs::remove_file(&staging).await;
                return Err(e);
            }
        };
        debug!("Resized image staged at {}", staging.display());

        if let Err(e) = fs::rename(&staging, dest).await {
            let _ = fs::remove_file(&staging).await;
            return Err(anyhow::Error::from(e)
                .context(format!("Failed to promote resized image to {}", dest.display())));
        }
        info!("Final image saved to {}", dest.display());

        Ok(match outcome {
            ResizeOutcome::Resized { width, height } => StageOutcome::Resized { width, height },
            ResizeOutcome::CopiedWithinBound { width, height } => {
                StageOutcome::CopiedWithinBound { width, height }
            }
        })
    }

    /// Staging sibling for a destination path: same directory, reserved
    /// prefix, process id to keep concurrent runs apart.
    fn staging_path(dest: &Path) -> Result<PathBuf> {
        let name = dest
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", dest.display()))?;
        let staged = format!(
            "{}{}-{}",
            STAGING_PREFIX,
            std::process::id(),
            name.to_string_lossy()
        );
        Ok(dest.with_file_name(staged))
    }
}
