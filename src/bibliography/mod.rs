//! Citation numbering and bibliography reconstruction.
//!
//! Generated text cites sources loosely: numeric markers such as `[3]`,
//! numbered reference lines, and unnumbered lines that merely look like
//! references. [`CitationRegistry`] assigns every marker a stable ordinal for
//! the whole export and collects entry texts, then [`CitationRegistry::finalize`]
//! produces a dense list with placeholders for cited-but-missing sources.

mod heuristics;
mod parse;

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::model::Locale;
use crate::patterns::CITATION_MARKER_RE;

pub use heuristics::SourceHeuristics;
pub use parse::{collect_section, parse_citation_run};

/// Largest number accepted as an explicit citation. Bracketed numbers above
/// it are left alone as ordinary text.
pub const MAX_CITATION: u32 = 999;

/// One line of the finished bibliography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographyEntry {
    /// Position in the printed list, starting at 1.
    pub position: u32,
    pub text: String,
    /// True for generated "missing source" placeholders.
    pub missing: bool,
}

/// Per-export citation state.
#[derive(Debug, Default)]
pub struct CitationRegistry {
    /// Highest ordinal handed out or recorded so far.
    max_issued: u32,
    /// Synthetic key -> ordinal, for unnumbered sources.
    synthetic: HashMap<String, u32>,
    entries: BTreeMap<u32, String>,
    /// Entries that lost their ordinal to an earlier writer, in discovery order.
    overflow: Vec<String>,
    /// Normalized texts already recorded, for deduplication.
    seen: HashSet<String>,
    dedupe: bool,
}

impl CitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop entries whose normalized text was already recorded.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Return the ordinal for a citation marker.
    ///
    /// Integers up to [`MAX_CITATION`] (`"12"`, `"[12]"`, `"12."`) are
    /// returned as-is.
    /// Anything else is a synthetic key that gets the next number above every
    /// ordinal seen so far; the same key always maps to the same ordinal.
    pub fn ensure_ordinal(&mut self, marker: &str) -> u32 {
        if let Some(n) = parse_numeric_marker(marker) {
            self.max_issued = self.max_issued.max(n);
            return n;
        }

        let key = normalize_text(marker);
        if let Some(&ordinal) = self.synthetic.get(&key) {
            return ordinal;
        }
        let ordinal = self.max_issued + 1;
        self.max_issued = ordinal;
        debug!(ordinal, key = %key, "assigned synthetic citation ordinal");
        self.synthetic.insert(key, ordinal);
        ordinal
    }

    /// Record the entry text for an ordinal. The first writer keeps the slot.
    ///
    /// Returns `true` if the text ended up in the bibliography.
    pub fn record_entry(&mut self, ordinal: u32, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || ordinal == 0 {
            return false;
        }
        let key = normalize_text(text);
        if self.dedupe && self.seen.contains(&key) {
            debug!(ordinal, "dropped duplicate bibliography entry");
            return false;
        }
        self.max_issued = self.max_issued.max(ordinal);

        match self.entries.get(&ordinal) {
            None => {
                self.entries.insert(ordinal, text.to_string());
            }
            Some(existing) if normalize_text(existing) == key => return false,
            Some(_) => {
                debug!(ordinal, "ordinal already taken, keeping entry as overflow");
                self.overflow.push(text.to_string());
            }
        }
        self.seen.insert(key);
        true
    }

    /// Record an unnumbered source line under a synthetic ordinal.
    pub fn record_source(&mut self, text: &str) -> Option<u32> {
        let key = normalize_text(text);
        if key.is_empty() || (self.dedupe && self.seen.contains(&key)) {
            return None;
        }
        let ordinal = self.ensure_ordinal(text);
        self.record_entry(ordinal, text).then_some(ordinal)
    }

    /// Whether any ordinal was issued or any entry recorded.
    pub fn is_empty(&self) -> bool {
        self.max_issued == 0 && self.overflow.is_empty()
    }

    /// Whether any entry text was recorded.
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty() || !self.overflow.is_empty()
    }

    pub fn max_ordinal(&self) -> u32 {
        self.max_issued
    }

    /// Build the dense, ordered bibliography.
    ///
    /// Every position `1..=max_ordinal()` is filled, with a placeholder where
    /// no entry was recorded. Overflow entries follow in discovery order.
    pub fn finalize(&self, locale: Locale) -> Vec<BibliographyEntry> {
        let mut list: Vec<BibliographyEntry> = (1..=self.max_issued)
            .map(|ordinal| match self.entries.get(&ordinal) {
                Some(text) => BibliographyEntry {
                    position: ordinal,
                    text: text.clone(),
                    missing: false,
                },
                None => BibliographyEntry {
                    position: ordinal,
                    text: locale.missing_source(ordinal),
                    missing: true,
                },
            })
            .collect();

        for text in &self.overflow {
            list.push(BibliographyEntry {
                position: list.len() as u32 + 1,
                text: text.clone(),
                missing: false,
            });
        }
        list
    }
}

/// Rewrite every inline `[n]` marker in `text` through the registry.
///
/// Lists and ranges are normalized: `[3 ,5]` becomes `[3, 5]`, `[3-5]`
/// becomes `[3–5]`. Markers holding `0` or a number above [`MAX_CITATION`]
/// are not citations and stay as written.
pub fn rewrite_citations(text: &str, registry: &mut CitationRegistry) -> String {
    CITATION_MARKER_RE
        .replace_all(text, |caps: &regex_lite::Captures<'_>| {
            let in_range = caps[1]
                .split([',', ';', '-', '–', '—'])
                .all(|n| parse_numeric_marker(n).is_some());
            if !in_range {
                return caps[0].to_string();
            }

            let parts: Vec<String> = caps[1]
                .split([',', ';'])
                .map(|part| {
                    let bounds: Vec<u32> = part
                        .split(['-', '–', '—'])
                        .map(|n| registry.ensure_ordinal(n))
                        .collect();
                    match bounds.as_slice() {
                        [start, end, ..] => format!("{start}–{end}"),
                        [single] => single.to_string(),
                        [] => String::new(),
                    }
                })
                .collect();
            format!("[{}]", parts.join(", "))
        })
        .into_owned()
}

/// Parse `12`, `[12]`, `12.` or `12)` as an ordinal in `1..=MAX_CITATION`.
fn parse_numeric_marker(marker: &str) -> Option<u32> {
    let digits = marker
        .trim()
        .trim_start_matches('[')
        .trim_end_matches([']', '.', ')'])
        .trim();
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_CITATION).contains(n))
}

/// Comparison key: lower-case, single-spaced, without trailing punctuation.
pub(crate) fn normalize_text(text: &str) -> String {
    let collapsed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_end_matches(|c: char| c.is_ascii_punctuation() || c == '…')
        .to_string()
}
