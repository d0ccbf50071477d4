//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path di destinazione.
//! La struttura relativa della source root viene preservata identica
//! sotto la dest root.

use crate::error::RedimError;
use std::path::{Path, PathBuf};

/// Maps source paths to their mirrored destination paths
pub struct PathResolver;

impl PathResolver {
    /// Re-root an input path from `source_root` to `dest_root`, keeping
    /// every intermediate directory segment.
    ///
    /// Pure lexical computation, no filesystem access: both roots are
    /// expected to be canonicalized up front (see `Config::validate`).
    /// Inputs outside the source root are rejected.
    pub fn map(
        source_root: &Path,
        dest_root: &Path,
        input_path: &Path,
    ) -> Result<PathBuf, RedimError> {
        let relative = input_path
            .strip_prefix(source_root)
            .map_err(|_| RedimError::InvalidPath {
                path: input_path.to_path_buf(),
                source_root: source_root.to_path_buf(),
            })?;

        Ok(dest_root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_relative_structure() {
        let mapped = PathResolver::map(
            Path::new("/a"),
            Path::new("/b"),
            Path::new("/a/x/img.png"),
        )
        .unwrap();
        assert_eq!(mapped, PathBuf::from("/b/x/img.png"));
    }

    #[test]
    fn test_map_file_at_root() {
        let mapped =
            PathResolver::map(Path::new("/a"), Path::new("/b"), Path::new("/a/img.jpg")).unwrap();
        assert_eq!(mapped, PathBuf::from("/b/img.jpg"));
    }

    #[test]
    fn test_map_deep_nesting() {
        let mapped = PathResolver::map(
            Path::new("/photos/2024"),
            Path::new("/out"),
            Path::new("/photos/2024/trips/rome/day1/IMG_001.jpeg"),
        )
        .unwrap();
        assert_eq!(mapped, PathBuf::from("/out/trips/rome/day1/IMG_001.jpeg"));
    }

    #[test]
    fn test_map_rejects_outside_source_root() {
        let result = PathResolver::map(
            Path::new("/a"),
            Path::new("/b"),
            Path::new("/elsewhere/img.png"),
        );
        assert!(matches!(result, Err(RedimError::InvalidPath { .. })));
    }
}
