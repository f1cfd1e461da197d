//! Datum-type resolution for configuration entries.
//!
//! Description files usually omit a PCD's datum type, so it is inferred
//! from the module's own C sources: a `PcdGet<suffix>(Name)` or
//! `PcdSet<suffix>(Name, ...)` call is textual evidence of the intended
//! width. This is pattern search over source text, not C parsing.
//!
//! Resolution is all-or-nothing: the first entry that cannot be resolved
//! aborts the whole batch, and no partial result is surfaced.

use regex::Regex;

use crate::alloc::AllocationContext;
use crate::error::{Error, Result};
use crate::pcd::{DatumType, PCD_TYPE_DYNAMIC, Pcd};
use crate::source::SourceFile;

/// Resolve a batch of entries against the module's source set.
///
/// Every entry, resolved or not, receives an allocator-issued token value
/// and token-space GUID and is marked Dynamic — allocation is unconditional
/// so the sequences stay aligned with entry order. Entries without a datum
/// type are then inferred from the `.c` sources, in input order.
///
/// Returns the first failure encountered; on failure the batch must be
/// treated as unusable (a prefix of the entries may already carry assigned
/// values, but the contract is all-or-first-error).
pub fn resolve_all(
    pcds: &mut [Pcd],
    sources: &[SourceFile],
    ctx: &mut AllocationContext,
) -> Result<()> {
    for pcd in pcds.iter_mut() {
        pcd.token_value = Some(ctx.tokens.next().to_string());
        pcd.token_space_guid_value = Some(ctx.guids.next().to_c_initializer());
        pcd.pcd_type = Some(PCD_TYPE_DYNAMIC.to_string());
    }

    let contents = read_c_sources(sources)?;
    resolve_datum_types(pcds, &contents)
}

/// Read every `.c` source fully into memory, in input order.
///
/// Scan order equals input file order, and first-match-wins below depends
/// on it.
fn read_c_sources(sources: &[SourceFile]) -> Result<Vec<String>> {
    sources
        .iter()
        .filter(|file| file.is_c_source())
        .map(SourceFile::read_contents)
        .collect()
}

/// Infer and assign a datum type for every entry that lacks one.
fn resolve_datum_types(pcds: &mut [Pcd], contents: &[String]) -> Result<()> {
    for pcd in pcds.iter_mut() {
        if pcd.datum_type.is_some() {
            continue;
        }

        let suffix = infer_suffix(&pcd.token_c_name, contents)?;
        let datum_type = DatumType::from_accessor_suffix(&suffix)
            .ok_or(Error::UnsupportedDatumType(suffix))?;

        pcd.datum_type = Some(datum_type);
        pcd.default_value = Some(datum_type.placeholder_default().to_string());
    }
    Ok(())
}

/// Search the scanned contents for accessor calls naming `name` and return
/// the normalized type suffix of the winning match.
///
/// Only the first getter match and the first setter match across all files
/// are kept; a setter match wins because a set call pins the width the code
/// actually writes.
fn infer_suffix(name: &str, contents: &[String]) -> Result<String> {
    let escaped = regex::escape(name);
    let get_pattern = Regex::new(&format!(r"PcdGet(.*?)\({escaped}\)"))
        .expect("escaped entry name forms a valid pattern");
    let set_pattern = Regex::new(&format!(r"PcdSet(.*?)\({escaped},"))
        .expect("escaped entry name forms a valid pattern");

    let mut get_suffix: Option<String> = None;
    let mut set_suffix: Option<String> = None;

    for text in contents {
        // Cheap substring pre-filter before running the patterns.
        if !text.contains(name) {
            continue;
        }
        if get_suffix.is_none() {
            if let Some(captures) = get_pattern.captures(text) {
                get_suffix = Some(captures[1].to_string());
            }
        }
        if set_suffix.is_none() {
            if let Some(captures) = set_pattern.captures(text) {
                set_suffix = Some(captures[1].to_string());
            }
        }
    }

    set_suffix
        .or(get_suffix)
        .map(|raw| normalize_suffix(&raw))
        .ok_or_else(|| Error::UnresolvedDatumType(name.to_string()))
}

/// Normalize a raw accessor suffix: drop whitespace, then strip the
/// trailing `S` that distinguishes the status-returning accessor family
/// (`PcdSet32S`) — both families share a datum type.
fn normalize_suffix(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact.strip_suffix('S').unwrap_or(&compact).to_string()
}
