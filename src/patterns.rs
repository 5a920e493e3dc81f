//! Cached regex patterns for block classification and citation parsing.
//!
//! Uses LazyLock to compile patterns once on first use. `regex-lite` only
//! folds ASCII case, so Cyrillic keywords spell out both cases explicitly.

use regex_lite::Regex;
use std::sync::LazyLock;

// === Block cleanup ===

/// Markdown ATX heading markers at line start.
pub static MD_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s*").unwrap());

/// Blockquote markers at line start (possibly nested).
pub static MD_BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:>\s?)+").unwrap());

/// Bold markers.
pub static MD_BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*|__").unwrap());

/// `*italic*` spans. A lone `* ` bullet marker never matches.
pub static MD_ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*?)\*").unwrap());

/// `_italic_` spans starting at a word boundary.
pub static MD_ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[\s(])_([^_\s][^_]*?)_").unwrap());

// === Block rules ===

/// `Table 3. Label` / `Таблица 3 – Label` caption lines. The separator and
/// a label are required, so prose like `Table 1 shows...` never matches.
pub static TABLE_CAPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?i:table)|[Тт][Аа][Бб][Лл][Ии][Цц][Аа])\s*№?\s*(\d+)\s*[.:–—-]\s*(\S.*)$",
    )
    .unwrap()
});

/// Leading `Table N` prefix of a caption title: followed by a separator or
/// nothing at all.
pub static TABLE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?i:table)|[Тт][Аа][Бб][Лл][Ии][Цц][Аа])\s*№?\s*\d+\s*(?:[.:–—-]\s*|$)",
    )
    .unwrap()
});

/// Repeated caption prefixes inside prose, e.g. `Table 1. Table 1. Results`.
pub static CAPTION_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?:(?i:table)|[Тт][Аа][Бб][Лл][Ии][Цц][Аа])\s*\d+\s*[.:–—-]?\s*){2,}").unwrap()
});

/// `References:` / `Ссылки:` noise lines.
pub static REFERENCES_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?i:references)|[Сс][Сс][Ыы][Лл][Кк][Ии])\s*:").unwrap()
});

/// Bullet list item: `- text`, `* text`, `• text`.
pub static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*]\s+|•\s*)(.*)$").unwrap());

/// Numbered list item: `1. text`, `2) text`.
pub static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,3})[.)]\s+(.*)$").unwrap());

/// Separator rows of a pipe table (`|---|:--:|`, `+----+`).
pub static TABLE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s|:+=–—-]+$").unwrap());

// === Citations ===

/// Inline citation marker: `[3]`, `[3, 5]`, `[3-5]`, `[1; 4]`.
pub static CITATION_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*(\d+(?:\s*[,;–—-]\s*\d+)*)\s*\]").unwrap()
});

/// One `[n] text` group. Brackets not followed by a digit stay in the text.
pub static CITATION_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]\s*((?:[^\[]|\[\D)*)").unwrap());

/// A plausible publication year.
pub static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(1[5-9]\d{2}|20\d{2})(?:\D|$)").unwrap());

/// Web address or DOI.
pub static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://|www\.|doi\.org/|\bdoi:\s*10\.").unwrap());

// === Headings ===

/// Title of a references section, matched against the lower-cased title.
/// English keywords must be whole words ("Resources" is not "sources").
pub static BIBLIOGRAPHY_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:references|bibliography|sources|works\s+cited)\b|литератур|источник|библиограф")
        .unwrap()
});

/// Numbering the generator already put in front of a section title.
pub static HEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+(?:\.\d+)*[.)]?\s+").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_caption() {
        let caps = TABLE_CAPTION_RE.captures("Таблица 2 – Итоги года").unwrap();
        assert_eq!(&caps[1], "2");
        assert_eq!(&caps[2], "Итоги года");

        let caps = TABLE_CAPTION_RE.captures("TABLE 10. Results").unwrap();
        assert_eq!(&caps[1], "10");
        assert_eq!(&caps[2], "Results");

        assert!(!TABLE_CAPTION_RE.is_match("Tables are useful"));
        assert!(!TABLE_CAPTION_RE.is_match("Table 1 shows that revenue grew."));
        assert!(!TABLE_CAPTION_RE.is_match("Таблица 2 показывает рост выручки."));
        assert!(!TABLE_CAPTION_RE.is_match("Table 3."));
    }

    #[test]
    fn test_table_prefix_needs_separator() {
        assert!(TABLE_PREFIX_RE.is_match("Table 3. Results"));
        assert!(TABLE_PREFIX_RE.is_match("Таблица 1"));
        assert!(!TABLE_PREFIX_RE.is_match("Table 1 shows results"));
    }

    #[test]
    fn test_bibliography_title() {
        assert!(BIBLIOGRAPHY_TITLE_RE.is_match("sources"));
        assert!(BIBLIOGRAPHY_TITLE_RE.is_match("list of sources used"));
        assert!(BIBLIOGRAPHY_TITLE_RE.is_match("works cited"));
        assert!(!BIBLIOGRAPHY_TITLE_RE.is_match("human resources management"));
        assert!(!BIBLIOGRAPHY_TITLE_RE.is_match("energy resources"));
    }

    #[test]
    fn test_bullet_and_numbered() {
        assert_eq!(&BULLET_RE.captures("- item").unwrap()[1], "item");
        assert_eq!(&BULLET_RE.captures("•item").unwrap()[1], "item");
        assert!(!BULLET_RE.is_match("-5 degrees"));
        assert_eq!(&NUMBERED_RE.captures("12) twelve").unwrap()[2], "twelve");
        assert!(!NUMBERED_RE.is_match("2020. was a year"));
    }

    #[test]
    fn test_year_and_url() {
        assert!(YEAR_RE.is_match("Smith J. Methods. 2020."));
        assert!(YEAR_RE.is_match("М.: Наука, 1999г."));
        assert!(!YEAR_RE.is_match("page 12345"));
        assert!(URL_RE.is_match("see https://example.org"));
        assert!(URL_RE.is_match("WWW.example.org"));
        assert!(!URL_RE.is_match("no link here"));
    }

    #[test]
    fn test_citation_group_keeps_inner_brackets() {
        let text = "[1] Doe J. Web [Electronic resource]. 2021. [2] Roe A. Book. 2019.";
        let groups: Vec<_> = CITATION_GROUP_RE
            .captures_iter(text)
            .map(|c| (c[1].to_string(), c[2].trim().to_string()))
            .collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, "Doe J. Web [Electronic resource]. 2021.");
        assert_eq!(groups[1].0, "2");
    }
}
