//! Script Detection
//!
//! Classifies a text fragment into one of a closed set of script tags using
//! Unicode code-point ranges. When a fragment mixes scripts, the tag that
//! comes first in [`ScriptTag::PRIORITY`] wins, so output is deterministic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Script tag used to pick a rendering font
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTag {
    /// Hebrew (also covers Yiddish)
    Hebrew,
    /// Arabic (also covers Persian and Urdu)
    Arabic,
    /// Armenian
    Armenian,
    /// Bengali
    Bengali,
    /// Georgian
    Georgian,
    /// Han, Hiragana, Katakana and Hangul
    Cjk,
    /// Devanagari (Hindi, Nepali)
    Devanagari,
    /// Greek
    Greek,
    /// Cyrillic
    Cyrillic,
    /// Latin
    Latin,
    /// Universal fallback slot of the font table
    Fallback,
}

type Range = (u32, u32);

const HEBREW: &[Range] = &[(0x0590, 0x05FF), (0xFB1D, 0xFB4F)];
const ARABIC: &[Range] = &[
    (0x0600, 0x06FF),
    (0x0750, 0x077F),
    (0x08A0, 0x08FF),
    (0xFB50, 0xFDFF),
    (0xFE70, 0xFEFF),
];
const ARMENIAN: &[Range] = &[(0x0530, 0x058F), (0xFB13, 0xFB17)];
const BENGALI: &[Range] = &[(0x0980, 0x09FF)];
const GEORGIAN: &[Range] = &[(0x10A0, 0x10FF)];
const CJK: &[Range] = &[
    // Han
    (0x4E00, 0x9FFF),
    (0x3400, 0x4DBF),
    (0xF900, 0xFAFF),
    // Kana
    (0x3040, 0x309F),
    (0x30A0, 0x30FF),
    // Hangul
    (0xAC00, 0xD7AF),
    (0x1100, 0x11FF),
    (0x3130, 0x318F),
];
const DEVANAGARI: &[Range] = &[(0x0900, 0x097F)];
const GREEK: &[Range] = &[(0x0370, 0x03FF), (0x1F00, 0x1FFF)];
const CYRILLIC: &[Range] = &[(0x0400, 0x04FF)];
const LATIN: &[Range] = &[
    (0x0041, 0x005A),
    (0x0061, 0x007A),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x024F),
    (0x1E00, 0x1EFF),
];

impl ScriptTag {
    /// Detection priority. Every tag except `Fallback`, highest first.
    pub const PRIORITY: [ScriptTag; 10] = [
        ScriptTag::Hebrew,
        ScriptTag::Arabic,
        ScriptTag::Armenian,
        ScriptTag::Bengali,
        ScriptTag::Georgian,
        ScriptTag::Cjk,
        ScriptTag::Devanagari,
        ScriptTag::Greek,
        ScriptTag::Cyrillic,
        ScriptTag::Latin,
    ];

    /// Every tag, in declaration order
    pub const ALL: [ScriptTag; 11] = [
        ScriptTag::Hebrew,
        ScriptTag::Arabic,
        ScriptTag::Armenian,
        ScriptTag::Bengali,
        ScriptTag::Georgian,
        ScriptTag::Cjk,
        ScriptTag::Devanagari,
        ScriptTag::Greek,
        ScriptTag::Cyrillic,
        ScriptTag::Latin,
        ScriptTag::Fallback,
    ];

    fn ranges(self) -> &'static [Range] {
        match self {
            ScriptTag::Hebrew => HEBREW,
            ScriptTag::Arabic => ARABIC,
            ScriptTag::Armenian => ARMENIAN,
            ScriptTag::Bengali => BENGALI,
            ScriptTag::Georgian => GEORGIAN,
            ScriptTag::Cjk => CJK,
            ScriptTag::Devanagari => DEVANAGARI,
            ScriptTag::Greek => GREEK,
            ScriptTag::Cyrillic => CYRILLIC,
            ScriptTag::Latin => LATIN,
            ScriptTag::Fallback => &[],
        }
    }

    /// Check if a character falls in one of this script's ranges
    pub fn contains(self, c: char) -> bool {
        let cp = c as u32;
        self.ranges().iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
    }

    /// Script of a single character, if it belongs to a known script
    pub fn of_char(c: char) -> Option<ScriptTag> {
        Self::PRIORITY.into_iter().find(|tag| tag.contains(c))
    }

    /// Detect the primary script of a text fragment.
    ///
    /// Returns the highest-priority tag with at least one matching character,
    /// or `Latin` when no character matches any range.
    pub fn detect(text: &str) -> ScriptTag {
        Self::PRIORITY
            .into_iter()
            .find(|tag| text.chars().any(|c| tag.contains(c)))
            .unwrap_or(ScriptTag::Latin)
    }

    /// Every script present in a text fragment
    pub fn detect_all(text: &str) -> ScriptSet {
        text.chars().filter_map(Self::of_char).collect()
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ScriptTag::Hebrew => "hebrew",
            ScriptTag::Arabic => "arabic",
            ScriptTag::Armenian => "armenian",
            ScriptTag::Bengali => "bengali",
            ScriptTag::Georgian => "georgian",
            ScriptTag::Cjk => "cjk",
            ScriptTag::Devanagari => "devanagari",
            ScriptTag::Greek => "greek",
            ScriptTag::Cyrillic => "cyrillic",
            ScriptTag::Latin => "latin",
            ScriptTag::Fallback => "fallback",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for ScriptTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown script name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown script tag: {0}")]
pub struct UnknownScript(pub String);

impl FromStr for ScriptTag {
    type Err = UnknownScript;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.name() == lower)
            .ok_or(UnknownScript(s.to_string()))
    }
}

/// Set of script tags, iterated in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ScriptSet(u16);

impl ScriptSet {
    pub const EMPTY: ScriptSet = ScriptSet(0);

    pub fn insert(&mut self, tag: ScriptTag) {
        self.0 |= tag.bit();
    }

    pub fn contains(&self, tag: ScriptTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Two or more scripts
    pub fn is_multilingual(&self) -> bool {
        self.len() > 1
    }

    /// Highest-priority member
    pub fn primary(&self) -> Option<ScriptTag> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = ScriptTag> + '_ {
        ScriptTag::PRIORITY.into_iter().filter(|tag| self.contains(*tag))
    }
}

impl FromIterator<ScriptTag> for ScriptSet {
    fn from_iter<I: IntoIterator<Item = ScriptTag>>(iter: I) -> Self {
        let mut set = ScriptSet::EMPTY;
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<const N: usize> From<[ScriptTag; N]> for ScriptSet {
    fn from(tags: [ScriptTag; N]) -> Self {
        tags.into_iter().collect()
    }
}
