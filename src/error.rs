//! Error types for scaffolding generation.
//!
//! Every failure here is fatal to the run: this is a static pass over fixed
//! input, so there are no retries and no partial results. The caller's only
//! remedy is to fix the input (declare the datum type explicitly, supply the
//! missing source file, or extend the canonical type set).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing a description file or resolving PCDs.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw PCD declaration lacks the required `Namespace.Name` structure.
    #[error("malformed PCD declaration '{0}': expected <TokenSpaceGuidCName>.<TokenCName>")]
    MalformedDeclaration(String),

    /// A referenced source file could not be read.
    #[error("could not read source file {path}: {source}")]
    SourceUnavailable {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A PCD's name never matched an accessor pattern in any scanned source.
    #[error("PCD '{0}' was not referenced in any source file, could not infer datum type")]
    UnresolvedDatumType(String),

    /// A matched accessor suffix is outside the canonical EDK2 set.
    #[error("PcdGet or PcdSet referenced the data type '{0}', which is not supported in EDK2")]
    UnsupportedDatumType(String),

    /// The description file is missing a section the pipeline requires.
    #[error("description file has no [{0}] section")]
    MissingSection(String),

    /// The description file itself could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The scaffold report could not be written.
    #[error("could not write {path}: {source}")]
    Write {
        /// Path to the file that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The scaffold report could not be serialized.
    #[error("could not serialize scaffold report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
