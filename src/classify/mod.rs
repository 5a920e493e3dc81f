//! Block classification.
//!
//! Section content arrives as loosely formatted generated text. It is split
//! into blank-line-delimited blocks and each block is turned into styled
//! nodes by the first rule in [`rules::RULES`] that accepts it.
//!
//! Before the rules run, a block is cleaned: markdown markers are stripped,
//! a leading `Table N. <label>` line is held as the pending caption for the
//! next table, and `References:` lines are dropped.

mod cleanup;
mod rules;

use tracing::trace;

use crate::context::ExportContext;
use crate::model::StyledNode;
use crate::patterns::{REFERENCES_LINE_RE, TABLE_CAPTION_RE};

pub use cleanup::{split_blocks, strip_markdown};
pub(crate) use cleanup::join_lines;

/// Classify one block into zero or more styled nodes.
///
/// Never fails: anything no rule recognizes becomes a body paragraph.
pub fn classify(block: &str, ctx: &mut ExportContext) -> Vec<StyledNode> {
    let lines = prepare(block, ctx);
    if lines.is_empty() {
        return Vec::new();
    }

    for rule in rules::RULES {
        if let Some(nodes) = (rule.apply)(&lines, ctx) {
            trace!(rule = rule.name, nodes = nodes.len(), "classified block");
            return nodes;
        }
    }
    Vec::new()
}

/// Classify every block of a section body in order.
pub fn classify_content(content: &str, ctx: &mut ExportContext) -> Vec<StyledNode> {
    split_blocks(content)
        .iter()
        .flat_map(|block| classify(block, ctx))
        .collect()
}

/// Clean a block and consume its caption and `References:` lines.
fn prepare(block: &str, ctx: &mut ExportContext) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in block.lines() {
        let line = strip_markdown(raw);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if REFERENCES_LINE_RE.is_match(line) {
            ctx.pending_caption = None;
            continue;
        }
        if lines.is_empty()
            && let Some(caps) = TABLE_CAPTION_RE.captures(line)
        {
            ctx.pending_caption = Some(caps[2].trim().to_string());
            continue;
        }
        lines.push(line.to_string());
    }
    lines
}
