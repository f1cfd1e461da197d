//! Source-file records for datum-type resolution.
//!
//! A thin path value object: the resolver only needs the file name, its
//! extension, and a path it can read contents from. Paths listed in a
//! `[Sources]` section are relative to the module root.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A source file referenced by a description document.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name with extension (`Util.c`).
    pub name: String,
    /// File name without extension (`Util`).
    pub base_name: String,
    /// Extension including the leading dot (`.c`), empty if none.
    pub ext: String,
    /// Full path, module root already joined.
    pub path: PathBuf,
}

impl SourceFile {
    /// Build a record for `relative` under `root`.
    pub fn new(root: &Path, relative: &str) -> SourceFile {
        let path = root.join(relative);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base_name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        SourceFile { name, base_name, ext, path }
    }

    /// Build records for every entry of a `[Sources]` list.
    pub fn from_sources<'a, I>(root: &Path, sources: I) -> Vec<SourceFile>
    where
        I: IntoIterator<Item = &'a str>,
    {
        sources.into_iter().map(|s| SourceFile::new(root, s)).collect()
    }

    /// Only `.c` files participate in datum-type resolution.
    pub fn is_c_source(&self) -> bool {
        self.ext == ".c"
    }

    /// Read the full contents; failure is fatal to the resolution batch.
    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| Error::SourceUnavailable {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_relative_path() {
        let file = SourceFile::new(Path::new("/module"), "Helpers/Util.c");
        assert_eq!(file.name, "Util.c");
        assert_eq!(file.base_name, "Util");
        assert_eq!(file.ext, ".c");
        assert_eq!(file.path, PathBuf::from("/module/Helpers/Util.c"));
    }

    #[test]
    fn extension_match_is_exact() {
        assert!(SourceFile::new(Path::new("."), "a.c").is_c_source());
        assert!(!SourceFile::new(Path::new("."), "a.h").is_c_source());
        assert!(!SourceFile::new(Path::new("."), "a.C").is_c_source());
        assert!(!SourceFile::new(Path::new("."), "Makefile").is_c_source());
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let file = SourceFile::new(Path::new("/nonexistent"), "gone.c");
        let err = file.read_contents().unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { ref path, .. } if path.ends_with("gone.c")));
    }
}
