//! PCD (Platform Configuration Database entry) model.
//!
//! A declaration line in a description file carries at least
//! `TokenSpaceGuidCName.TokenCName`; the default value, datum type, and
//! token that may follow are deliberately discarded — real INFs rarely
//! carry them, and the resolution pass assigns scaffolding-administered
//! values instead.

use crate::error::{Error, Result};

/// Every scaffolded PCD is emitted as Dynamic so its value is not extern.
pub const PCD_TYPE_DYNAMIC: &str = "Dynamic";

/// Default maximum datum size carried by every entry.
pub const DEFAULT_MAX_DATUM_SIZE: u32 = 32;

/// The closed set of EDK2 datum types an accessor suffix can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumType {
    U8,
    U16,
    U32,
    U64,
    Bool,
    Ptr,
}

impl DatumType {
    /// Map a normalized accessor suffix (`8`, `16`, `32`, `64`, `Bool`,
    /// `Ptr`) to its datum type. Anything else is unsupported.
    pub fn from_accessor_suffix(suffix: &str) -> Option<DatumType> {
        match suffix {
            "8" => Some(DatumType::U8),
            "16" => Some(DatumType::U16),
            "32" => Some(DatumType::U32),
            "64" => Some(DatumType::U64),
            "Bool" => Some(DatumType::Bool),
            "Ptr" => Some(DatumType::Ptr),
            _ => None,
        }
    }

    /// The canonical EDK2 type name.
    pub fn canonical_name(self) -> &'static str {
        match self {
            DatumType::U8 => "UINT8",
            DatumType::U16 => "UINT16",
            DatumType::U32 => "UINT32",
            DatumType::U64 => "UINT64",
            DatumType::Bool => "BOOLEAN",
            DatumType::Ptr => "VOID*",
        }
    }

    /// Fixed placeholder default for the type.
    ///
    /// Tests must not rely on these values and should force returns from
    /// the accessor mocks instead; they exist so generated modules build.
    pub fn placeholder_default(self) -> &'static str {
        match self {
            DatumType::U8 => "8",
            DatumType::U16 => "16",
            DatumType::U32 => "32",
            DatumType::U64 => "64",
            DatumType::Bool => "FALSE",
            DatumType::Ptr => {
                "{ 0xdc, 0x5b, 0xc2, 0xee, 0xf2, 0x67, 0x95, 0x4d, 0xb1, 0xd5, 0xf8, 0x1b, 0x20, 0x39, 0xd1, 0x1d }"
            }
        }
    }
}

/// A configuration entry, parsed from its raw declaration and completed by
/// the resolution pass.
///
/// After [`resolve_all`](crate::resolve::resolve_all) succeeds, every
/// optional field is populated and the entry is never mutated again.
#[derive(Debug, Clone)]
pub struct Pcd {
    pub token_space_guid_c_name: String,
    pub token_c_name: String,
    pub default_value: Option<String>,
    pub datum_type: Option<DatumType>,
    pub token_value: Option<String>,
    pub token_space_guid_value: Option<String>,
    pub pcd_type: Option<String>,
    pub max_datum_size: u32,
}

impl Pcd {
    /// Parse a raw `<Namespace>.<Name>[|<Default>|<Type>|<Token>]`
    /// declaration.
    ///
    /// Fields after the first `|` normally don't get put into INFs anyway;
    /// they are skipped and later populated by the resolution pass.
    pub fn parse(raw: &str) -> Result<Pcd> {
        let trimmed = raw.trim();
        let malformed = || Error::MalformedDeclaration(raw.to_string());

        let (namespace, rest) = trimmed.split_once('.').ok_or_else(malformed)?;
        let name = rest.split('|').next().unwrap_or(rest).trim();
        let namespace = namespace.trim();
        if namespace.is_empty() || name.is_empty() {
            return Err(malformed());
        }

        Ok(Pcd {
            token_space_guid_c_name: namespace.to_string(),
            token_c_name: name.to_string(),
            default_value: None,
            datum_type: None,
            token_value: None,
            token_space_guid_value: None,
            pcd_type: None,
            max_datum_size: DEFAULT_MAX_DATUM_SIZE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_namespace_and_name() {
        let pcd = Pcd::parse("gTokenSpaceGuid.PcdMyValue").unwrap();
        assert_eq!(pcd.token_space_guid_c_name, "gTokenSpaceGuid");
        assert_eq!(pcd.token_c_name, "PcdMyValue");
        assert_eq!(pcd.max_datum_size, 32);
        assert!(pcd.datum_type.is_none());
        assert!(pcd.pcd_type.is_none());
    }

    #[test]
    fn declared_default_type_and_token_are_discarded() {
        let pcd = Pcd::parse("gTokenSpaceGuid.PcdMyValue|0x42|UINT32|7").unwrap();
        assert_eq!(pcd.token_c_name, "PcdMyValue");
        assert!(pcd.default_value.is_none());
        assert!(pcd.datum_type.is_none());
        assert!(pcd.token_value.is_none());
    }

    #[test]
    fn declaration_without_dot_is_malformed() {
        let err = Pcd::parse("PcdMyValue").unwrap_err();
        assert!(matches!(err, Error::MalformedDeclaration(ref raw) if raw == "PcdMyValue"));
    }

    #[test]
    fn empty_name_is_malformed() {
        assert!(Pcd::parse("gTokenSpaceGuid.").is_err());
        assert!(Pcd::parse(".PcdMyValue").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let pcd = Pcd::parse("  gTokenSpaceGuid.PcdMyValue  ").unwrap();
        assert_eq!(pcd.token_space_guid_c_name, "gTokenSpaceGuid");
        assert_eq!(pcd.token_c_name, "PcdMyValue");
    }

    #[test]
    fn suffix_table_covers_the_canonical_set() {
        assert_eq!(DatumType::from_accessor_suffix("8"), Some(DatumType::U8));
        assert_eq!(DatumType::from_accessor_suffix("16"), Some(DatumType::U16));
        assert_eq!(DatumType::from_accessor_suffix("32"), Some(DatumType::U32));
        assert_eq!(DatumType::from_accessor_suffix("64"), Some(DatumType::U64));
        assert_eq!(DatumType::from_accessor_suffix("Bool"), Some(DatumType::Bool));
        assert_eq!(DatumType::from_accessor_suffix("Ptr"), Some(DatumType::Ptr));
        assert_eq!(DatumType::from_accessor_suffix("Fancy"), None);
        assert_eq!(DatumType::from_accessor_suffix(""), None);
    }

    #[test]
    fn canonical_names_and_defaults_are_paired() {
        assert_eq!(DatumType::U32.canonical_name(), "UINT32");
        assert_eq!(DatumType::U32.placeholder_default(), "32");
        assert_eq!(DatumType::Bool.canonical_name(), "BOOLEAN");
        assert_eq!(DatumType::Bool.placeholder_default(), "FALSE");
        assert!(DatumType::Ptr.placeholder_default().starts_with("{ 0xdc"));
    }
}
