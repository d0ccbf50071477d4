//! # Image Resize Module
//!
//! Questo modulo implementa il contratto di resize "fit-inside".
//!
//! ## Caratteristiche:
//! - **Fit-inside**: entrambe le dimensioni finali sono ≤ del bound,
//!   aspect ratio preservata
//! - **Mai upscaling**: immagini già dentro il bound vengono copiate
//!   byte-per-byte, senza ricodifica (le GIF animate piccole restano intatte)
//! - **Formato preservato**: l'output usa lo stesso formato dell'input,
//!   determinato dall'estensione dell'input e mai dal nome del file di output
//! - **Nessun file parziale**: in caso di errore di encoding l'output
//!   viene rimosso prima di propagare l'errore
//!
//! Il filtro di downscale è Lanczos3. Le GIF animate sopra il bound vengono
//! ricodificate dal codec, che mantiene solo il primo frame.

use crate::config::ResizeBound;
use crate::error::RedimError;
use image::imageops::FilterType;
use std::path::Path;
use tracing::debug;

/// What the codec did with one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Image exceeded the bound and was re-encoded at the new size
    Resized { width: u32, height: u32 },
    /// Image already fit inside the bound and was copied unchanged
    CopiedWithinBound { width: u32, height: u32 },
}

/// Fit-inside resizer with a fixed bound for the whole run
#[derive(Debug, Clone, Copy)]
pub struct ImageResizer {
    bound: ResizeBound,
}

impl ImageResizer {
    pub fn new(bound: ResizeBound) -> Self {
        Self { bound }
    }

    /// Resize the raster image at `input` into `output`.
    ///
    /// Writes exactly one file at `output` on success and nothing on
    /// failure. `output` must not exist as a directory; its parent must
    /// already exist.
    pub fn resize_to_fit(&self, input: &Path, output: &Path) -> Result<ResizeOutcome, RedimError> {
        // Output format follows the input's extension, so the staging
        // file's reserved-prefix name never influences encoding.
        let format = image::ImageFormat::from_path(input)?;
        let img = image::open(input)?;

        let (width, height) = (img.width(), img.height());
        if self.bound.contains(width, height) {
            debug!(
                "{} already within {}x{}, copying unchanged",
                input.display(),
                self.bound.max_width,
                self.bound.max_height
            );
            std::fs::copy(input, output)?;
            return Ok(ResizeOutcome::CopiedWithinBound { width, height });
        }

        let resized = img.resize(
            self.bound.max_width,
            self.bound.max_height,
            FilterType::Lanczos3,
        );

        if let Err(e) = resized.save_with_format(output, format) {
            // Discard whatever the encoder managed to write
            let _ = std::fs::remove_file(output);
            return Err(e.into());
        }

        debug!(
            "{}: {}x{} -> {}x{}",
            input.display(),
            width,
            height,
            resized.width(),
            resized.height()
        );

        Ok(ResizeOutcome::Resized {
            width: resized.width(),
            height: resized.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_pixel(width, height, Rgb::<u8>([120, 80, 40]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_downscale_respects_bound_and_aspect_ratio() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("out.png");
        write_png(&input, 2000, 1000);

        let resizer = ImageResizer::new(ResizeBound::new(1200, 1200));
        let outcome = resizer.resize_to_fit(&input, &output).unwrap();

        assert_eq!(
            outcome,
            ResizeOutcome::Resized {
                width: 1200,
                height: 600
            }
        );
        let saved = image::open(&output).unwrap();
        assert_eq!((saved.width(), saved.height()), (1200, 600));
    }

    #[test]
    fn test_no_upscale_copies_bytes_unchanged() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("small.png");
        let output = dir.path().join("out.png");
        write_png(&input, 400, 300);

        let resizer = ImageResizer::new(ResizeBound::new(1200, 1200));
        let outcome = resizer.resize_to_fit(&input, &output).unwrap();

        assert_eq!(
            outcome,
            ResizeOutcome::CopiedWithinBound {
                width: 400,
                height: 300
            }
        );
        assert_eq!(fs::read(&input).unwrap(), fs::read(&output).unwrap());
    }

    #[test]
    fn test_tall_image_bounded_by_height() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("tall.png");
        let output = dir.path().join("out.png");
        write_png(&input, 500, 2400);

        let resizer = ImageResizer::new(ResizeBound::new(1200, 1200));
        let outcome = resizer.resize_to_fit(&input, &output).unwrap();

        assert_eq!(
            outcome,
            ResizeOutcome::Resized {
                width: 250,
                height: 1200
            }
        );
    }

    #[test]
    fn test_corrupt_input_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("corrupt.jpg");
        let output = dir.path().join("out.jpg");
        fs::write(&input, b"this is not a jpeg").unwrap();

        let resizer = ImageResizer::new(ResizeBound::default());
        assert!(resizer.resize_to_fit(&input, &output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_deterministic_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.png");
        write_png(&input, 2000, 1000);

        let resizer = ImageResizer::new(ResizeBound::new(1200, 1200));
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        resizer.resize_to_fit(&input, &first).unwrap();
        resizer.resize_to_fit(&input, &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
