//! Spoken-language locales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "cs-CZ")]
    Czech,
    #[serde(rename = "en-US")]
    English,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Czech => "cs-CZ",
            Locale::English => "en-US",
        }
    }

    /// Primary language subtag (`cs`, `en`).
    pub fn language(&self) -> &'static str {
        match self {
            Locale::Czech => "cs",
            Locale::English => "en",
        }
    }

    pub fn toggled(&self) -> Locale {
        match self {
            Locale::Czech => Locale::English,
            Locale::English => Locale::Czech,
        }
    }

    pub fn all() -> &'static [Locale] {
        &[Locale::Czech, Locale::English]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale tag: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-");
        Locale::all()
            .iter()
            .copied()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
