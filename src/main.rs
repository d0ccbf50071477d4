//! # Redim - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (root directory, bound, --test, etc.)
//! 2. Apre il run log `redim-<timestamp>.log` e inizializza `tracing`
//! 3. Valida le precondizioni (entrambe le root devono esistere)
//! 4. Discovery delle immagini e conferma dell'operatore
//! 5. Avvia il `BatchRunner` e stampa il riepilogo
//!
//! ## Exit codes:
//! - 0: batch completato, oppure operazione annullata dall'operatore
//! - 1: precondizione fallita o errore fatale fuori dal boundary per-file
//!
//! ## Esempio di utilizzo:
//! ```bash
//! redim --from-root-dir ./photos --to-root-dir ./resized --test
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use redim::{prompt, BatchRunner, Config, FileManager, ResizeBound};

/// How many images a `--test` run attempts before stopping
const TEST_MODE_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "redim")]
#[command(about = "Resize every image under a directory tree into a mirrored destination")]
struct Args {
    /// Directory to read images from
    #[arg(long)]
    from_root_dir: PathBuf,

    /// Directory to write images to (structure is mirrored)
    #[arg(long)]
    to_root_dir: PathBuf,

    /// Run in test mode, processing only 10 images
    #[arg(long)]
    test: bool,

    /// Maximum output width in pixels
    #[arg(long, default_value = "1200")]
    max_width: u32,

    /// Maximum output height in pixels
    #[arg(long, default_value = "1200")]
    max_height: u32,

    /// Number of parallel workers
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    // Top-level boundary: anything the batch did not handle itself is
    // fatal. The log writer is unbuffered, so events are already on disk.
    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<i32> {
    let mut config = Config {
        source_root: args.from_root_dir,
        dest_root: args.to_root_dir,
        bound: ResizeBound::new(args.max_width, args.max_height),
        limit: args.test.then_some(TEST_MODE_LIMIT),
        workers: args.workers,
    };
    config.validate()?;

    info!(
        "🎯 Resizing to fit {}x{} (never upscaling)",
        config.bound.max_width, config.bound.max_height
    );
    info!("📁 Source: {}", config.source_root.display());
    info!("📁 Destination: {}", config.dest_root.display());

    let images = FileManager::find_image_files(&config.source_root)?;
    info!(
        "Found {} images under {}",
        images.len(),
        config.source_root.display()
    );

    // The gate sits before any write, so declining leaves the
    // destination tree completely untouched.
    if !args.yes && !prompt::confirm_batch(images.len())? {
        info!("Operation cancelled by user.");
        println!("Operation cancelled by user.");
        return Ok(0);
    }

    let result = BatchRunner::new(config).run(images).await?;
    println!("{}", result.format_summary());

    info!("Exiting gracefully...");
    Ok(0)
}

/// Send all tracing events to an append-only run log in the working
/// directory, one log file per invocation.
fn init_logging(verbose: bool) -> Result<()> {
    let log_name = format!(
        "redim-{}.log",
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S")
    );
    let file = std::fs::File::create(&log_name)?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
