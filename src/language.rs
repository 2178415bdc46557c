//! Language tags.
//!
//! A closed set of two-letter ISO 639-1 identifiers. Parsing is an exact,
//! case-sensitive match; anything else maps to [`Language::Unknown`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A human language the mind can be asked in.
///
/// # Examples
///
/// ```
/// use kumarmind::Language;
///
/// assert_eq!(Language::parse("de"), Language::De);
/// assert_eq!(Language::parse("DE"), Language::Unknown);
/// assert_eq!(Language::De.name(), "de");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Arabic.
    Ar,
    /// German.
    De,
    /// Greek.
    El,
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Hindi.
    Hi,
    /// Italian.
    It,
    /// Japanese.
    Ja,
    /// Korean.
    Ko,
    /// Dutch.
    Nl,
    /// Polish.
    Pl,
    /// Portuguese.
    Pt,
    /// Russian.
    Ru,
    /// Turkish.
    Tr,
    /// Chinese.
    Zh,
    /// Any unrecognised tag.
    #[default]
    Unknown,
}

impl Language {
    /// Every known tag, `Unknown` excluded.
    pub const ALL: [Self; 16] = [
        Self::Ar,
        Self::De,
        Self::El,
        Self::En,
        Self::Es,
        Self::Fr,
        Self::Hi,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Nl,
        Self::Pl,
        Self::Pt,
        Self::Ru,
        Self::Tr,
        Self::Zh,
    ];

    /// Parses a tag; unrecognised names yield `Unknown`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.name() == name)
            .unwrap_or(Self::Unknown)
    }

    /// Canonical name of the tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::De => "de",
            Self::El => "el",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Hi => "hi",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::Ru => "ru",
            Self::Tr => "tr",
            Self::Zh => "zh",
            Self::Unknown => "unknown",
        }
    }

    /// True for the `Unknown` tag.
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
