//! Acceptance rules for source-looking lines.

use crate::patterns::{URL_RE, YEAR_RE};

/// Tunable rules deciding whether a line is a bibliography entry.
///
/// A line is accepted when it has a four-digit year and ends in terminal
/// punctuation, or when it contains a URL, unless it is filler prose: longer
/// than `max_len` characters or opening with a discourse connective.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SourceHeuristics {
    /// Lines longer than this many characters are prose, not references.
    pub max_len: usize,
    /// Lower-case openers of filler sentences.
    pub connectives: Vec<String>,
}

const DEFAULT_CONNECTIVES: &[&str] = &[
    "рассмотрим",
    "важно",
    "следует",
    "таким образом",
    "кроме того",
    "однако",
    "например",
    "в заключение",
    "необходимо отметить",
    "consider",
    "it is important",
    "note that",
    "therefore",
    "thus",
    "however",
    "in conclusion",
    "for example",
];

impl Default for SourceHeuristics {
    fn default() -> Self {
        Self {
            max_len: 400,
            connectives: DEFAULT_CONNECTIVES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SourceHeuristics {
    /// Whether `line` should be kept as a bibliography entry.
    pub fn accepts(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || self.is_filler(line) {
            return false;
        }
        (YEAR_RE.is_match(line) && ends_with_terminal(line)) || URL_RE.is_match(line)
    }

    /// Ordinary prose that merely happens to contain a date or link.
    pub fn is_filler(&self, line: &str) -> bool {
        let line = line.trim();
        if line.chars().count() > self.max_len {
            return true;
        }
        let lower = line.to_lowercase();
        self.connectives.iter().any(|connective| {
            lower
                .strip_prefix(connective.as_str())
                .is_some_and(|rest| !rest.starts_with(char::is_alphanumeric))
        })
    }
}

fn ends_with_terminal(line: &str) -> bool {
    let line = line.trim_end_matches(['"', '\'', '»', '”', ')', ']']);
    line.ends_with(['.', '!', '?', '…'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_reference() {
        let h = SourceHeuristics::default();
        assert!(h.accepts("Smith J. Research Methods. 2020."));
        assert!(h.accepts("Иванов И.И. Экономика. – М.: Наука, 2019. – 320 с."));
        assert!(h.accepts("Open data portal: https://data.example.org"));
    }

    #[test]
    fn test_rejects_filler() {
        let h = SourceHeuristics::default();
        assert!(!h.accepts("Рассмотрим подробно данный вопрос с учётом 2020 года."));
        assert!(!h.accepts("However, in 2020 the market grew."));
        assert!(!h.accepts("Таким образом, см. https://example.org"));
    }

    #[test]
    fn test_requires_terminal_punctuation_with_year() {
        let h = SourceHeuristics::default();
        assert!(!h.accepts("Smith J. Research Methods 2020"));
        assert!(h.accepts("Smith J. Research Methods (2020)."));
        assert!(!h.accepts("A sentence without any year."));
    }

    #[test]
    fn test_connective_must_be_whole_word() {
        let h = SourceHeuristics::default();
        // "Thusnelda" is a name, not the connective "thus"
        assert!(!h.is_filler("Thusnelda K. Essays. 2001."));
        assert!(h.is_filler("Thus, 2001."));
    }

    #[test]
    fn test_overly_long_is_filler() {
        let h = SourceHeuristics {
            max_len: 20,
            ..Default::default()
        };
        assert!(h.is_filler("Smith J. Research Methods. 2020."));
        assert!(!h.accepts("Smith J. Research Methods. 2020."));
    }
}
