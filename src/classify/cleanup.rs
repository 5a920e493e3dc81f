//! Text cleanup shared by the classifier and the bibliography parser.

use crate::patterns::{
    MD_BLOCKQUOTE_RE, MD_BOLD_RE, MD_HEADING_RE, MD_ITALIC_STAR_RE, MD_ITALIC_UNDERSCORE_RE,
};

/// Split section content into blocks separated by blank lines.
pub fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// Remove heading, blockquote, bold and italic markers from one line.
///
/// Bullet markers (`- `, `* `) are left alone.
pub fn strip_markdown(line: &str) -> String {
    let line = MD_BLOCKQUOTE_RE.replace(line, "");
    let line = MD_HEADING_RE.replace(&line, "");
    let line = MD_BOLD_RE.replace_all(&line, "");
    let line = MD_ITALIC_STAR_RE.replace_all(&line, "${1}");
    let line = MD_ITALIC_UNDERSCORE_RE.replace_all(&line, "${1}${2}");
    line.into_owned()
}

/// Join lines into one space-separated string with whitespace collapsed.
pub(crate) fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .flat_map(|line| line.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
