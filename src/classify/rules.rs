//! The block rule chain.
//!
//! Each rule inspects the cleaned lines of one block and either claims it,
//! returning the nodes to emit, or passes by returning `None`.

use tracing::debug;

use super::join_lines;
use crate::bibliography::{parse_citation_run, rewrite_citations};
use crate::context::ExportContext;
use crate::error::ExportWarning;
use crate::figures::{table_caption, table_node};
use crate::model::{ListKind, ListNode, Paragraph, StyledNode};
use crate::patterns::{BULLET_RE, CAPTION_NOISE_RE, NUMBERED_RE, TABLE_SEPARATOR_RE};

type RuleFn = fn(&[String], &mut ExportContext) -> Option<Vec<StyledNode>>;

pub(crate) struct Rule {
    pub name: &'static str,
    pub apply: RuleFn,
}

/// Rules in priority order. The last one always matches.
pub(crate) const RULES: [Rule; 5] = [
    Rule {
        name: "bulleted_list",
        apply: bulleted_list,
    },
    Rule {
        name: "numbered_list",
        apply: numbered_list,
    },
    Rule {
        name: "pipe_table",
        apply: pipe_table,
    },
    Rule {
        name: "citation_run",
        apply: citation_run,
    },
    Rule {
        name: "paragraph",
        apply: paragraph,
    },
];

// ============================================================================
// Lists
// ============================================================================

fn bulleted_list(lines: &[String], ctx: &mut ExportContext) -> Option<Vec<StyledNode>> {
    let items = lines
        .iter()
        .map(|line| BULLET_RE.captures(line).map(|c| c[1].trim().to_string()))
        .collect::<Option<Vec<_>>>()?;
    Some(vec![list(ListKind::Bulleted, items, ctx)])
}

fn numbered_list(lines: &[String], ctx: &mut ExportContext) -> Option<Vec<StyledNode>> {
    let items = lines
        .iter()
        .map(|line| NUMBERED_RE.captures(line).map(|c| c[2].trim().to_string()))
        .collect::<Option<Vec<_>>>()?;
    Some(vec![list(ListKind::Numbered, items, ctx)])
}

fn list(kind: ListKind, items: Vec<String>, ctx: &mut ExportContext) -> StyledNode {
    let items = items
        .iter()
        .filter(|item| !item.is_empty())
        .map(|item| rewrite_citations(item, &mut ctx.registry))
        .collect();
    StyledNode::List(ListNode::new(kind, items))
}

// ============================================================================
// Pipe tables
// ============================================================================

fn is_pipe_row(line: &str) -> bool {
    line.contains('|')
}

fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn pipe_table(lines: &[String], ctx: &mut ExportContext) -> Option<Vec<StyledNode>> {
    let start = lines.iter().position(|l| is_pipe_row(l))?;
    let len = lines[start..]
        .iter()
        .position(|l| !is_pipe_row(l))
        .unwrap_or(lines.len() - start);
    let end = start + len;

    let rows: Vec<Vec<String>> = lines[start..end]
        .iter()
        .filter(|l| !TABLE_SEPARATOR_RE.is_match(l))
        .map(|l| split_cells(l))
        .collect();
    if rows.len() < 2 || rows[0].len() < 2 {
        return None;
    }

    let headers: Vec<String> = rows[0]
        .iter()
        .map(|cell| rewrite_citations(cell, &mut ctx.registry))
        .collect();
    let body: Vec<Vec<String>> = rows[1..]
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| rewrite_citations(cell, &mut ctx.registry))
                .collect()
        })
        .collect();

    let mut nodes = Vec::new();
    if start > 0 {
        nodes.extend(paragraph(&lines[..start], ctx)?);
    }

    let title = ctx.pending_caption.take();
    if body.iter().any(|row| row.len() != headers.len()) {
        ctx.warn(ExportWarning::TableRowsNormalized {
            section: ctx.section_id.clone(),
            table: title.clone().unwrap_or_default(),
        });
    }
    nodes.push(StyledNode::Paragraph(table_caption(ctx, title.as_deref())));
    nodes.push(StyledNode::Table(table_node(&headers, &body)));

    if end < lines.len() {
        nodes.extend(paragraph(&lines[end..], ctx)?);
    }
    Some(nodes)
}

// ============================================================================
// Inline bibliography runs
// ============================================================================

/// A block made only of `[n] text` groups feeds the bibliography.
///
/// Claimed only if at least one group looks like a real source; otherwise
/// the block is prose and falls through to [`paragraph`].
fn citation_run(lines: &[String], ctx: &mut ExportContext) -> Option<Vec<StyledNode>> {
    let groups = parse_citation_run(&lines.join("\n"))?;
    let heuristics = &ctx.config.heuristics;
    let accepted: Vec<(u32, String)> = groups
        .into_iter()
        .filter(|(number, text)| {
            let ok = heuristics.accepts(text);
            if !ok {
                debug!(number, "rejected inline source");
            }
            ok
        })
        .collect();
    if accepted.is_empty() {
        return None;
    }

    for (number, text) in accepted {
        let ordinal = ctx.registry.ensure_ordinal(&number.to_string());
        ctx.registry.record_entry(ordinal, &text);
    }
    Some(Vec::new())
}

// ============================================================================
// Fallback
// ============================================================================

fn paragraph(lines: &[String], ctx: &mut ExportContext) -> Option<Vec<StyledNode>> {
    let text = join_lines(lines);
    if text.is_empty() {
        return Some(Vec::new());
    }
    let text = CAPTION_NOISE_RE.replace_all(&text, "${1}");
    let text = rewrite_citations(&text, &mut ctx.registry);
    Some(vec![StyledNode::Paragraph(Paragraph::body(text))])
}
