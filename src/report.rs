//! Scaffold report assembly and output.
//!
//! The report is the hand-off point to external code generation: every
//! section the generator needs, with synthetic identifiers already
//! substituted and every PCD fully resolved, written as pretty JSON.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::alloc::AllocationContext;
use crate::error::{Error, Result};
use crate::inf::{InfDocument, Section};
use crate::pcd::Pcd;
use crate::resolve::resolve_all;
use crate::source::SourceFile;
use crate::verbose::{dprintln, vprintln};

/// Everything downstream code generation needs from one description file.
#[derive(Debug, Serialize)]
pub struct Scaffold {
    pub defines: Section,
    pub sources: Vec<String>,
    pub packages: Section,
    pub library_classes: Section,
    pub guids: Section,
    pub protocols: Section,
    pub ppis: Section,
    pub pcds: Vec<PcdRecord>,
}

/// A fully resolved PCD as emitted in the report.
#[derive(Debug, Serialize)]
pub struct PcdRecord {
    pub token_space_guid_c_name: String,
    pub token_c_name: String,
    pub pcd_type: String,
    pub datum_type: String,
    pub default_value: String,
    pub token_value: String,
    pub token_space_guid_value: String,
    pub max_datum_size: u32,
}

impl PcdRecord {
    /// Build a record from a resolved entry; `None` if any field is still
    /// absent (the entry did not go through a successful resolution pass).
    pub fn from_resolved(pcd: &Pcd) -> Option<PcdRecord> {
        Some(PcdRecord {
            token_space_guid_c_name: pcd.token_space_guid_c_name.clone(),
            token_c_name: pcd.token_c_name.clone(),
            pcd_type: pcd.pcd_type.clone()?,
            datum_type: pcd.datum_type?.canonical_name().to_string(),
            default_value: pcd.default_value.clone()?,
            token_value: pcd.token_value.clone()?,
            token_space_guid_value: pcd.token_space_guid_value.clone()?,
            max_datum_size: pcd.max_datum_size,
        })
    }
}

impl Scaffold {
    /// Extract every section from `doc` and resolve its PCDs against the
    /// `[Sources]` C files rooted at `source_root`.
    ///
    /// Allocation draws from `ctx` in a fixed order (guids, protocols,
    /// ppis, then per-PCD token/GUID pairs), so identical input and a fresh
    /// context always produce an identical report.
    pub fn build(
        doc: &InfDocument,
        source_root: &Path,
        ctx: &mut AllocationContext,
    ) -> Result<Scaffold> {
        let defines = doc.defines()?;
        let sources = doc.sources()?;
        let packages = doc.packages();
        let library_classes = doc.library_classes();

        let guids = doc.guids(ctx);
        let protocols = doc.protocols(ctx);
        let ppis = doc.ppis(ctx);

        let mut pcds = doc
            .pcds()
            .keys()
            .map(|raw| Pcd::parse(raw))
            .collect::<Result<Vec<_>>>()?;

        let source_files = SourceFile::from_sources(source_root, sources.iter().map(String::as_str));
        resolve_all(&mut pcds, &source_files, ctx)?;
        vprintln!("  resolved {} pcds against {} source files", pcds.len(), source_files.len());

        let records = pcds
            .iter()
            .map(PcdRecord::from_resolved)
            .collect::<Option<Vec<_>>>()
            .expect("resolve_all populates every field on success");

        Ok(Scaffold {
            defines,
            sources,
            packages,
            library_classes,
            guids,
            protocols,
            ppis,
            pcds: records,
        })
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `scaffold.json` under `dest`, creating the directory if
    /// needed. Returns the path written.
    pub fn write(&self, dest: &Path) -> Result<PathBuf> {
        let write_err = |source| Error::Write { path: dest.to_path_buf(), source };
        std::fs::create_dir_all(dest).map_err(write_err)?;

        let path = dest.join("scaffold.json");
        let json = self.to_json()?;
        std::fs::write(&path, json).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// End-to-end generation: parse `inf_path`, resolve against its sources,
/// and write the report under `dest`.
///
/// Source paths come from the `[Sources]` section and are joined to
/// `source_root` when given, otherwise to the description file's directory.
/// A fresh [`AllocationContext`] is created per invocation — one run, one
/// allocation stream.
pub fn generate(inf_path: &Path, source_root: Option<&Path>, dest: &Path) -> Result<PathBuf> {
    dprintln!("Parsing {}...", inf_path.display());
    let doc = InfDocument::load(inf_path)?;
    let root = source_root
        .map(Path::to_path_buf)
        .or_else(|| inf_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut ctx = AllocationContext::new();
    let scaffold = Scaffold::build(&doc, &root, &mut ctx)?;
    scaffold.write(dest)
}
