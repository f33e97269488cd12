//! XLIFF dialects and the names each one uses for the same concept.

use std::fmt;
use std::str::FromStr;

/// Supported XLIFF schema dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XliffVersion {
    /// XLIFF 1.2: `file/body/trans-unit`, `source`/`target` directly in the unit.
    V1_2,
    /// XLIFF 2.0: `file/unit/segment`, notes grouped under `notes`.
    V2_0,
}

impl XliffVersion {
    /// Map the root `version` attribute to a dialect.
    pub fn from_attr(version: &str) -> Option<Self> {
        match version {
            "1.2" => Some(Self::V1_2),
            "2.0" => Some(Self::V2_0),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_2 => "1.2",
            Self::V2_0 => "2.0",
        }
    }

    /// Element carrying the language attributes; `None` means the root itself.
    pub fn language_container(self) -> Option<&'static str> {
        match self {
            Self::V1_2 => Some("file"),
            Self::V2_0 => None,
        }
    }

    pub fn source_language_attr(self) -> &'static str {
        match self {
            Self::V1_2 => "source-language",
            Self::V2_0 => "srcLang",
        }
    }

    pub fn target_language_attr(self) -> &'static str {
        match self {
            Self::V1_2 => "target-language",
            Self::V2_0 => "trgLang",
        }
    }

    /// Element whose children are the translation units.
    pub fn unit_container(self) -> &'static str {
        match self {
            Self::V1_2 => "body",
            Self::V2_0 => "file",
        }
    }

    pub fn unit_tag(self) -> &'static str {
        match self {
            Self::V1_2 => "trans-unit",
            Self::V2_0 => "unit",
        }
    }

    /// Element grouping a unit's notes; `None` means the unit itself.
    pub fn notes_container(self) -> Option<&'static str> {
        match self {
            Self::V1_2 => None,
            Self::V2_0 => Some("notes"),
        }
    }

    /// Attribute telling a `meaning` note from a `description` note.
    pub fn note_kind_attr(self) -> &'static str {
        match self {
            Self::V1_2 => "from",
            Self::V2_0 => "category",
        }
    }

    /// Element holding `source`/`target`; `None` means the unit itself.
    pub fn segment_container(self) -> Option<&'static str> {
        match self {
            Self::V1_2 => None,
            Self::V2_0 => Some("segment"),
        }
    }
}

impl fmt::Display for XliffVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedVersion(pub String);

impl fmt::Display for UnsupportedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported XLIFF version {:?}", self.0)
    }
}

impl std::error::Error for UnsupportedVersion {}

impl FromStr for XliffVersion {
    type Err = UnsupportedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_attr(s).ok_or_else(|| UnsupportedVersion(s.to_string()))
    }
}
