//! # Progress Tracking Module
//!
//! Questo modulo gestisce il feedback visivo del batch con `indicatif`.
//!
//! ## Responsabilità:
//! - Barra di progresso con percentuale, tempo elapsed e conteggio
//! - Un tick per ogni file tentato, qualunque sia l'esito
//! - Messaggio finale con il riepilogo del run
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:42] [==============>-------------------------] 150/412 (36%) ✅ photo.jpg
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages the progress bar for one batch run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar sized for the number of files to attempt
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
                )
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Tick once and show a per-file message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final summary message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
