//! # Confirmation Prompt Module
//!
//! Gate di conferma prima del batch. La risposta di default è sì, come il
//! prompt interattivo originale. Il gate legge da un qualunque `BufRead`,
//! così il contratto resta testabile senza stdin reale; `main` fornisce
//! lo stdin vero.

use anyhow::Result;
use std::io::BufRead;

/// Ask the operator to confirm processing `count` images on stdin.
///
/// Declining must leave the destination tree untouched, so this runs
/// before any directory is created.
pub fn confirm_batch(count: usize) -> Result<bool> {
    println!("Are you sure you want to process {} images? [Y/n]", count);
    let stdin = std::io::stdin();
    read_confirmation(stdin.lock())
}

/// Read one answer line from any reader; empty input means yes
pub fn read_confirmation(mut reader: impl BufRead) -> Result<bool> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(parse_confirmation(&line))
}

/// Interpret one answer line; empty input means yes
fn parse_confirmation(line: &str) -> bool {
    let answer = line.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_manager::FileManager;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_yes_variants() {
        assert!(read_confirmation(Cursor::new(&b"y\n"[..])).unwrap());
        assert!(read_confirmation(Cursor::new(&b"Y\n"[..])).unwrap());
        assert!(read_confirmation(Cursor::new(&b"yes\n"[..])).unwrap());
        assert!(read_confirmation(Cursor::new(&b"YES\n"[..])).unwrap());
    }

    #[test]
    fn test_empty_defaults_to_yes() {
        assert!(read_confirmation(Cursor::new(&b"\n"[..])).unwrap());
        assert!(read_confirmation(Cursor::new(&b"   \n"[..])).unwrap());
        // Closed stdin reads as an empty line
        assert!(read_confirmation(Cursor::new(&b""[..])).unwrap());
    }

    #[test]
    fn test_no_variants() {
        assert!(!read_confirmation(Cursor::new(&b"n\n"[..])).unwrap());
        assert!(!read_confirmation(Cursor::new(&b"no\n"[..])).unwrap());
        assert!(!read_confirmation(Cursor::new(&b"anything else\n"[..])).unwrap());
    }

    #[test]
    fn test_declining_leaves_destination_untouched() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        std::fs::create_dir_all(source.path().join("sub")).unwrap();
        std::fs::write(source.path().join("sub/a.jpg"), b"x").unwrap();

        // Same sequence as main: discovery first, then the gate; only a
        // yes answer may reach the runner.
        let images = FileManager::find_image_files(source.path()).unwrap();
        assert_eq!(images.len(), 1);

        let proceed = read_confirmation(Cursor::new(&b"n\n"[..])).unwrap();
        assert!(!proceed);
        assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
    }
}
