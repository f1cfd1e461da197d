//! EDK2 module description (INF) file parsing and section extraction.
//!
//! INF files are INI-style: `[Section]` headers, `key = value` or bare `key`
//! lines, comments introduced by `#` or `//`. Keys keep their case and their
//! source declaration order — the order decides which synthetic GUID each
//! key receives during substitution, so it must be stable across re-parses
//! of unchanged input.

use std::path::Path;

use indexmap::IndexMap;

use crate::alloc::AllocationContext;
use crate::error::{Error, Result};

pub const SECTION_DEFINES: &str = "Defines";
pub const SECTION_SOURCES: &str = "Sources";
pub const SECTION_PACKAGES: &str = "Packages";
pub const SECTION_LIBRARY_CLASSES: &str = "LibraryClasses";
pub const SECTION_GUIDS: &str = "Guids";
pub const SECTION_PROTOCOLS: &str = "Protocols";
pub const SECTION_PCDS: &str = "Pcd";
pub const SECTION_PPIS: &str = "Ppis";

/// An ordered key/value section body. Bare keys carry an empty value.
pub type Section = IndexMap<String, String>;

/// A parsed description document.
///
/// Holds every section in declaration order; the extraction methods below
/// surface the recognized ones in cleaned (and, for identifier-bearing
/// sections, substituted) form.
#[derive(Debug, Default)]
pub struct InfDocument {
    sections: IndexMap<String, Section>,
}

impl InfDocument {
    /// Read and parse a description file.
    pub fn load(path: &Path) -> Result<InfDocument> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse description text.
    ///
    /// Tolerant in the same way the reference parser was configured to be:
    /// lines before the first section header and duplicate sections are
    /// merged rather than rejected, and a line without `=` is a bare key.
    pub fn parse(text: &str) -> InfDocument {
        let mut sections: IndexMap<String, Section> = IndexMap::new();
        let mut current: Option<String> = None;

        for raw_line in text.lines() {
            let line = strip_inline_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.split(']').next().unwrap_or(rest).trim();
                sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            let Some(section) = current.as_ref().and_then(|n| sections.get_mut(n)) else {
                // Key before any section header; nothing to attach it to.
                continue;
            };

            match line.split_once('=') {
                Some((key, value)) => {
                    section.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    section.insert(line.to_string(), String::new());
                }
            }
        }

        InfDocument { sections }
    }

    /// Raw access to a parsed section, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    fn require_section(&self, name: &str) -> Result<&Section> {
        self.section(name)
            .ok_or_else(|| Error::MissingSection(name.to_string()))
    }

    /// Cleaned `[Defines]` key/value pairs.
    pub fn defines(&self) -> Result<Section> {
        Ok(clean_pairs(self.require_section(SECTION_DEFINES)?))
    }

    /// Cleaned `[Sources]` file list (keys only; values are ignored).
    pub fn sources(&self) -> Result<Vec<String>> {
        let cleaned = clean_pairs(self.require_section(SECTION_SOURCES)?);
        Ok(cleaned.into_keys().collect())
    }

    /// Cleaned `[Packages]` pairs; empty when the section is absent.
    pub fn packages(&self) -> Section {
        self.section(SECTION_PACKAGES).map(clean_pairs).unwrap_or_default()
    }

    /// Cleaned `[LibraryClasses]` pairs; empty when the section is absent.
    pub fn library_classes(&self) -> Section {
        self.section(SECTION_LIBRARY_CLASSES)
            .map(clean_pairs)
            .unwrap_or_default()
    }

    /// `[Guids]` entries with every declared value replaced by a freshly
    /// allocated synthetic GUID, in declaration order.
    pub fn guids(&self, ctx: &mut AllocationContext) -> Section {
        self.substituted(SECTION_GUIDS, ctx)
    }

    /// `[Protocols]` entries with synthetic GUID values.
    pub fn protocols(&self, ctx: &mut AllocationContext) -> Section {
        self.substituted(SECTION_PROTOCOLS, ctx)
    }

    /// `[Ppis]` entries with synthetic GUID values.
    pub fn ppis(&self, ctx: &mut AllocationContext) -> Section {
        self.substituted(SECTION_PPIS, ctx)
    }

    /// Cleaned raw PCD declarations, merged from every section of the Pcd
    /// family (`[Pcd]`, `[PcdEx]`, `[FixedPcd]`, ...), in document order.
    ///
    /// PCD identity lives in the key; declared values are carried through
    /// untouched and ignored by the rest of the pipeline.
    pub fn pcds(&self) -> Section {
        let mut merged = Section::new();
        for (name, section) in &self.sections {
            if name.to_lowercase().contains("pcd") {
                merged.extend(clean_pairs(section));
            }
        }
        merged
    }

    /// The declared identifier value from the source document is never
    /// surfaced; only a freshly allocated synthetic identifier is returned.
    fn substituted(&self, name: &str, ctx: &mut AllocationContext) -> Section {
        let Some(section) = self.section(name) else {
            return Section::new();
        };
        clean_pairs(section)
            .into_keys()
            .map(|key| {
                let guid = ctx.guids.next().to_c_initializer();
                (key, guid)
            })
            .collect()
    }
}

/// Truncate at the first literal `#` (an end-of-line comment marker that
/// survives inside already-parsed values) and trim surrounding whitespace.
fn clean(s: &str) -> &str {
    match s.find('#') {
        Some(idx) => s[..idx].trim(),
        None => s.trim(),
    }
}

fn clean_pairs(section: &Section) -> Section {
    section
        .iter()
        .map(|(key, value)| (clean(key).to_string(), clean(value).to_string()))
        .collect()
}

/// Strip a trailing `#`- or `//`-introduced comment from a line.
///
/// A marker inside a double-quoted string does not open a comment.
fn strip_inline_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'"' => in_string = !in_string,
            b'#' if !in_string => return &line[..idx],
            b'/' if !in_string && bytes.get(idx + 1) == Some(&b'/') => return &line[..idx],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Guid;

    const SAMPLE: &str = r#"
## Leading file comment
[Defines]
  INF_VERSION    = 0x00010005   # hex version
  BASE_NAME      = SampleDxe
  MODULE_TYPE    = DXE_DRIVER

[Sources]
  SampleDxe.c
  Helpers/Util.c    // platform-neutral helpers
  SampleDxe.h

[Packages]
  MdePkg/MdePkg.dec

[LibraryClasses]
  BaseLib
  DebugLib

[Guids]
  gSampleTokenSpaceGuid = {0x1, 0x2, 0x3, {0x4, 0x5, 0x6, 0x7, 0x8, 0x9, 0xa, 0xb}}
  gOtherGuid

[Protocols]
  gEfiSampleProtocolGuid

[Pcd]
  gSampleTokenSpaceGuid.PcdSampleValue
  gSampleTokenSpaceGuid.PcdSampleFlag   # trailing note

[PcdEx]
  gSampleTokenSpaceGuid.PcdSampleExValue
"#;

    #[test]
    fn defines_are_cleaned_and_case_preserved() {
        let doc = InfDocument::parse(SAMPLE);
        let defines = doc.defines().unwrap();
        assert_eq!(defines.get("INF_VERSION").map(String::as_str), Some("0x00010005"));
        assert_eq!(defines.get("BASE_NAME").map(String::as_str), Some("SampleDxe"));
        // Case-folding the key would break lookups.
        assert!(defines.get("base_name").is_none());
    }

    #[test]
    fn sources_returns_keys_in_declaration_order() {
        let doc = InfDocument::parse(SAMPLE);
        let sources = doc.sources().unwrap();
        assert_eq!(sources, vec!["SampleDxe.c", "Helpers/Util.c", "SampleDxe.h"]);
    }

    #[test]
    fn missing_required_section_is_an_error() {
        let doc = InfDocument::parse("[Defines]\nBASE_NAME = X\n");
        let err = doc.sources().unwrap_err();
        assert!(matches!(err, Error::MissingSection(ref name) if name == "Sources"));
    }

    #[test]
    fn guid_values_are_substituted_in_declaration_order() {
        let doc = InfDocument::parse(SAMPLE);
        let mut ctx = AllocationContext::new();
        let guids = doc.guids(&mut ctx);

        assert_eq!(
            guids.get("gSampleTokenSpaceGuid").map(String::as_str),
            Some(Guid(0).to_c_initializer().as_str()),
        );
        assert_eq!(
            guids.get("gOtherGuid").map(String::as_str),
            Some(Guid(1).to_c_initializer().as_str()),
        );
        // The declared value never leaks through.
        assert!(!guids["gSampleTokenSpaceGuid"].contains("0x1,"));
    }

    #[test]
    fn substitution_sequence_continues_across_parses() {
        let mut ctx = AllocationContext::new();

        let doc = InfDocument::parse(SAMPLE);
        let first = doc.guids(&mut ctx);
        assert_eq!(first.len(), 2);

        let again = InfDocument::parse(SAMPLE);
        let second = again.guids(&mut ctx);
        assert_eq!(
            second.get("gSampleTokenSpaceGuid").map(String::as_str),
            Some(Guid(2).to_c_initializer().as_str()),
        );
        assert_eq!(
            second.get("gOtherGuid").map(String::as_str),
            Some(Guid(3).to_c_initializer().as_str()),
        );
    }

    #[test]
    fn protocols_share_the_same_allocation_stream() {
        let doc = InfDocument::parse(SAMPLE);
        let mut ctx = AllocationContext::new();
        let guids = doc.guids(&mut ctx);
        let protocols = doc.protocols(&mut ctx);
        assert_eq!(guids.len(), 2);
        assert_eq!(
            protocols.get("gEfiSampleProtocolGuid").map(String::as_str),
            Some(Guid(2).to_c_initializer().as_str()),
        );
    }

    #[test]
    fn pcd_family_sections_are_merged_in_document_order() {
        let doc = InfDocument::parse(SAMPLE);
        let pcds = doc.pcds();
        let keys: Vec<_> = pcds.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "gSampleTokenSpaceGuid.PcdSampleValue",
                "gSampleTokenSpaceGuid.PcdSampleFlag",
                "gSampleTokenSpaceGuid.PcdSampleExValue",
            ],
        );
    }

    #[test]
    fn inline_comments_are_stripped_but_not_inside_strings() {
        assert_eq!(strip_inline_comment("key = value # note"), "key = value ");
        assert_eq!(strip_inline_comment("key = value // note"), "key = value ");
        assert_eq!(
            strip_inline_comment(r#"key = "a # b" # real"#),
            r#"key = "a # b" "#,
        );
        assert_eq!(
            strip_inline_comment(r#"path = "http://x""#),
            r#"path = "http://x""#,
        );
    }

    #[test]
    fn bare_keys_get_empty_values() {
        let doc = InfDocument::parse("[LibraryClasses]\nBaseLib\n");
        let classes = doc.library_classes();
        assert_eq!(classes.get("BaseLib").map(String::as_str), Some(""));
    }

    #[test]
    fn empty_document_has_no_sections() {
        let doc = InfDocument::parse("# nothing but comments\n\n// here\n");
        assert!(doc.section(SECTION_DEFINES).is_none());
        assert!(doc.pcds().is_empty());
    }
}
