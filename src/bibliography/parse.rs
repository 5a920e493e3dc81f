//! Reading references out of loosely formatted text.

use tracing::debug;

use super::{CitationRegistry, MAX_CITATION, SourceHeuristics, normalize_text};
use crate::classify::strip_markdown;
use crate::patterns::{BULLET_RE, CITATION_GROUP_RE, NUMBERED_RE, REFERENCES_LINE_RE};

/// Split a block made only of `[n] text` groups into `(n, text)` pairs.
///
/// Returns `None` if anything other than such groups is present, including
/// text before the first marker, a group with an empty body, or a number
/// outside `1..=MAX_CITATION`.
pub fn parse_citation_run(block: &str) -> Option<Vec<(u32, String)>> {
    let text = block.trim();
    if !text.starts_with('[') {
        return None;
    }

    let mut groups = Vec::new();
    let mut covered = 0;
    for caps in CITATION_GROUP_RE.captures_iter(text) {
        let whole = caps.get(0)?;
        if whole.start() != covered {
            return None;
        }
        covered = whole.end();

        let ordinal: u32 = caps[1].parse().ok().filter(|n| (1..=MAX_CITATION).contains(n))?;
        let body = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");
        if body.is_empty() {
            return None;
        }
        groups.push((ordinal, body));
    }

    (covered == text.len() && !groups.is_empty()).then_some(groups)
}

/// Harvest entries from the body of a bibliography-tagged section.
///
/// Each line is cleaned of markdown and bullets. `[n] text` runs and
/// `n. text` lines keep their number; other lines become unnumbered sources.
/// Every candidate must pass `heuristics`. Returns the number of entries
/// recorded.
pub fn collect_section(
    content: &str,
    section_title: &str,
    registry: &mut CitationRegistry,
    heuristics: &SourceHeuristics,
) -> usize {
    let title_key = normalize_text(section_title);
    let mut recorded = 0;

    for raw in content.lines() {
        let cleaned = strip_markdown(raw);
        let mut line = cleaned.trim();
        if line.is_empty()
            || REFERENCES_LINE_RE.is_match(line)
            || normalize_text(line.trim_end_matches(':')) == title_key
        {
            continue;
        }
        if let Some(item) = BULLET_RE.captures(line).and_then(|c| c.get(1)) {
            line = item.as_str().trim();
        }

        if let Some(groups) = parse_citation_run(line) {
            for (number, text) in groups {
                if heuristics.accepts(&text) {
                    let ordinal = registry.ensure_ordinal(&number.to_string());
                    recorded += usize::from(registry.record_entry(ordinal, &text));
                } else {
                    debug!(number, "rejected numbered source line");
                }
            }
        } else if let Some(caps) = NUMBERED_RE.captures(line) {
            let text = caps[2].trim();
            if heuristics.accepts(text) {
                let ordinal = registry.ensure_ordinal(&caps[1]);
                recorded += usize::from(registry.record_entry(ordinal, text));
            } else {
                debug!(line = %text, "rejected numbered source line");
            }
        } else if heuristics.accepts(line) {
            recorded += usize::from(registry.record_source(line).is_some());
        } else {
            debug!(line = %line, "rejected source line");
        }
    }

    recorded
}
