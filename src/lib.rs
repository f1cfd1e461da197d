//! Reproducible test scaffolding for EDK2 module description files.
//!
//! Two jobs form the core: deterministic, order-dependent allocation of
//! synthetic GUIDs and integer tokens in place of real values, and
//! inference of missing PCD datum types by scanning a module's C sources
//! for `PcdGet`/`PcdSet` accessor calls.
//!
//! Pipeline: parse INF → extract sections (substituting synthetic GUIDs) →
//!           parse PCD declarations → resolve datum types → emit report.

pub mod alloc;
pub mod cli;
pub mod error;
pub mod inf;
pub mod pcd;
pub mod report;
pub mod resolve;
pub mod source;
pub mod verbose;

pub use error::{Error, Result};
