//! Script to font-file resolution
//!
//! Each script tag maps to an ordered list of candidate font paths: the
//! script-specific face first, then broader Unicode faces. The first
//! candidate that exists on disk wins; when none does, the table's universal
//! fallback is tried. Candidates containing `*` or `?` are glob patterns and
//! resolve to their first existing match.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::script::{ScriptSet, ScriptTag};
use crate::Result;

const NOTO_TTF: &str = "/usr/share/fonts/truetype/noto";
const NOTO_OTF: &str = "/usr/share/fonts/opentype/noto";
const DEJAVU_SANS: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
const LIBERATION_SANS: &str = "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf";

/// Per-installation font candidate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontTable {
    /// Ordered candidates per script
    #[serde(default)]
    pub scripts: BTreeMap<ScriptTag, Vec<String>>,
    /// Broad-coverage faces used for text mixing two or more scripts
    #[serde(default)]
    pub multilingual: Vec<String>,
    /// Universal fallback when no script candidate exists
    #[serde(default)]
    pub fallback: Option<String>,
}

impl FontTable {
    /// Empty table: every lookup falls through to `fallback`
    pub fn empty() -> Self {
        Self {
            scripts: BTreeMap::new(),
            multilingual: Vec::new(),
            fallback: None,
        }
    }

    /// Noto / DejaVu / Liberation paths as installed by Debian and Ubuntu
    /// `fonts-noto`, `fonts-noto-cjk`, `fonts-noto-extra` and `fonts-dejavu`.
    pub fn debian_noto() -> Self {
        let noto = |name: &str| format!("{NOTO_TTF}/{name}");
        let noto_otf = |name: &str| format!("{NOTO_OTF}/{name}");
        let general = vec![noto("NotoSans-Regular.ttf"), DEJAVU_SANS.into(), LIBERATION_SANS.into()];

        let mut scripts = BTreeMap::new();
        scripts.insert(
            ScriptTag::Hebrew,
            vec![
                noto("NotoSansHebrew-Regular.ttf"),
                noto_otf("NotoSansHebrew-Regular.otf"),
                noto("NotoSansHebrew[wght].ttf"),
                noto("NotoSansHebrew-*.ttf"),
                DEJAVU_SANS.into(),
                LIBERATION_SANS.into(),
            ],
        );
        scripts.insert(
            ScriptTag::Arabic,
            vec![
                noto("NotoSansArabic-Regular.ttf"),
                noto_otf("NotoSansArabic-Regular.otf"),
                noto("NotoSansArabic[wght].ttf"),
                DEJAVU_SANS.into(),
            ],
        );
        scripts.insert(
            ScriptTag::Armenian,
            vec![noto("NotoSansArmenian-Regular.ttf"), DEJAVU_SANS.into()],
        );
        scripts.insert(ScriptTag::Bengali, vec![noto("NotoSansBengali-Regular.ttf")]);
        scripts.insert(
            ScriptTag::Georgian,
            vec![noto("NotoSansGeorgian-Regular.ttf"), DEJAVU_SANS.into()],
        );
        scripts.insert(
            ScriptTag::Cjk,
            vec![
                noto_otf("NotoSansCJK-Regular.ttc"),
                noto("NotoSansCJKjp-Regular.otf"),
                noto_otf("NotoSansCJKjp-Regular.otf"),
            ],
        );
        scripts.insert(
            ScriptTag::Devanagari,
            vec![
                noto("NotoSansDevanagari-Regular.ttf"),
                noto_otf("NotoSansDevanagari-Regular.otf"),
                noto("NotoSansDevanagari[wght].ttf"),
            ],
        );
        scripts.insert(ScriptTag::Greek, general.clone());
        scripts.insert(ScriptTag::Cyrillic, general.clone());
        scripts.insert(ScriptTag::Latin, general);

        Self {
            scripts,
            multilingual: vec![
                DEJAVU_SANS.into(),
                noto("NotoSans-Regular.ttf"),
                LIBERATION_SANS.into(),
            ],
            fallback: Some(DEJAVU_SANS.into()),
        }
    }

    /// Load a table from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Replace the candidate list of one script
    pub fn with_candidates<I, S>(mut self, tag: ScriptTag, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripts
            .insert(tag, candidates.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the multilingual list
    pub fn with_multilingual<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multilingual = candidates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the universal fallback
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Candidates for a script (empty when the table has none)
    pub fn candidates(&self, tag: ScriptTag) -> &[String] {
        self.scripts.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for FontTable {
    fn default() -> Self {
        Self::debian_noto()
    }
}

/// Resolves script tags to existing font files
#[derive(Debug, Clone, Default)]
pub struct FontResolver {
    table: FontTable,
}

impl FontResolver {
    pub fn new(table: FontTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FontTable {
        &self.table
    }

    /// Resolve a script to a font path.
    ///
    /// Walks the script's candidates, then the universal fallback. `None`
    /// means the caller has to use the font primitive's own default.
    pub fn resolve(&self, tag: ScriptTag) -> Option<PathBuf> {
        if let Some(path) = first_existing(self.table.candidates(tag)) {
            return Some(path);
        }

        if let Some(path) = self.fallback() {
            tracing::debug!("No {} font installed, using fallback {}", tag, path.display());
            return Some(path);
        }

        tracing::warn!("No font found for script {} and no fallback installed", tag);
        None
    }

    /// Existing universal fallback
    pub fn fallback(&self) -> Option<PathBuf> {
        self.table.fallback.as_deref().and_then(existing)
    }

    /// Pick a font for a whole text, favouring broad-coverage faces when the
    /// text mixes scripts.
    ///
    /// - 3+ scripts: the first multilingual face (widest coverage), or
    ///   `None` so the caller uses the system default
    /// - CJK + Latin: the CJK list, since CJK faces carry Latin glyphs
    /// - any other pair: the multilingual list
    /// - otherwise, or when no font for the pair exists: [`resolve`] on the
    ///   detected primary script
    ///
    /// [`resolve`]: FontResolver::resolve
    pub fn resolve_for_text(&self, text: &str) -> Option<PathBuf> {
        let scripts = ScriptTag::detect_all(text);

        if scripts.len() >= 3 {
            let widest = self.table.multilingual.first().and_then(|c| existing(c));
            match widest {
                Some(path) => {
                    tracing::debug!("{} scripts detected, using {}", scripts.len(), path.display());
                    return Some(path);
                }
                None => {
                    tracing::warn!("{} scripts detected but no multilingual font found, using system default", scripts.len());
                    return None;
                }
            }
        } else if scripts.is_multilingual() {
            let candidates = if scripts == ScriptSet::from([ScriptTag::Cjk, ScriptTag::Latin]) {
                self.table.candidates(ScriptTag::Cjk)
            } else {
                &self.table.multilingual
            };
            if let Some(path) = first_existing(candidates) {
                return Some(path);
            }
        }

        if scripts.is_multilingual() {
            tracing::warn!("Multilingual text but no multilingual font found, falling back to script-specific");
        }
        self.resolve(ScriptTag::detect(text))
    }
}

fn is_pattern(candidate: &str) -> bool {
    candidate.contains('*') || candidate.contains('?')
}

fn existing(candidate: &str) -> Option<PathBuf> {
    if is_pattern(candidate) {
        let mut matches: Vec<PathBuf> = glob::glob(candidate)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        matches.sort();
        matches.into_iter().next()
    } else {
        let path = PathBuf::from(candidate);
        path.is_file().then_some(path)
    }
}

fn first_existing(candidates: &[String]) -> Option<PathBuf> {
    candidates.iter().find_map(|c| existing(c))
}
