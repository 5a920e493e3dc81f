//! Document assembly.
//!
//! An export runs three phases in order:
//!
//! 1. **Collect**: render the title page, walk the sections, classify their
//!    text, build tables and figures, and feed the citation registry.
//!    Bibliography sections only contribute entries and reserve a slot.
//! 2. **Reconcile**: finalize the bibliography, splice it into its slot and
//!    build the table of contents from the final headings.
//! 3. **Serialize**: handled by [`crate::export`].

use tracing::debug;

use crate::bibliography::collect_section;
use crate::classify::classify_content;
use crate::config::ExportConfig;
use crate::context::ExportContext;
use crate::error::{ExportWarning, Result};
use crate::figures::{build_figure, build_table};
use crate::model::{
    Document, ExportRequest, HeadingNode, ListKind, ListNode, Locale, Section, StyledNode,
};
use crate::patterns::HEADING_NUMBER_RE;
use crate::raster::{ChartKey, ChartRasterizer};
use crate::template;

/// Assembled document plus the non-fatal problems met on the way.
#[derive(Debug, Clone)]
pub struct Composition {
    pub document: Document,
    pub warnings: Vec<ExportWarning>,
}

/// Body content collected before the bibliography is known.
enum Slot {
    Node(StyledNode),
    Bibliography { title: String },
}

/// Build the node stream for `request`.
///
/// Fails only if required title fields are missing; every other problem is
/// contained and reported in [`Composition::warnings`].
pub async fn compose<R: ChartRasterizer>(
    request: &ExportRequest,
    template: Option<&[u8]>,
    config: &ExportConfig,
    rasterizer: &R,
) -> Result<Composition> {
    request.fields.validate()?;

    let locale = effective_locale(request, config);
    let mut ctx = ExportContext::new(config.clone().with_locale(locale));
    let fields = request.fields.resolve(locale);

    let (title_page, fallback) = template::render(&fields, request.style, locale, template);
    if let Some(warning) = fallback {
        ctx.warn(warning);
    }

    let mut slots = Vec::new();
    for section in &request.sections {
        collect(section, &mut ctx, rasterizer, &mut slots).await;
    }

    let body = reconcile(slots, &mut ctx);
    let entries: Vec<String> = body
        .iter()
        .filter_map(|node| match node {
            StyledNode::Heading(h) => Some(h.text.clone()),
            _ => None,
        })
        .collect();

    let mut nodes = title_page;
    nodes.push(StyledNode::PageBreak);
    nodes.push(StyledNode::TableOfContents {
        title: locale.toc_heading().to_string(),
        entries,
    });
    nodes.extend(body);

    debug!(
        nodes = nodes.len(),
        sections = ctx.section_number,
        tables = ctx.table_number,
        figures = ctx.figure_number,
        "composed document"
    );

    Ok(Composition {
        document: Document {
            title: fields.title,
            author: fields.author,
            language: locale.language_tag().to_string(),
            nodes,
        },
        warnings: ctx.warnings,
    })
}

/// Section title without numbering the generator already added.
fn clean_title(title: &str) -> &str {
    match HEADING_NUMBER_RE.find(title) {
        Some(m) => title[m.end()..].trim(),
        None => title.trim(),
    }
}

async fn collect<R: ChartRasterizer>(
    section: &Section,
    ctx: &mut ExportContext,
    rasterizer: &R,
    slots: &mut Vec<Slot>,
) {
    ctx.section_id = section.id.clone();
    ctx.pending_caption = None;
    let title = clean_title(&section.title);

    if section.is_bibliography() {
        let content = section.content.as_deref().unwrap_or_default();
        let recorded = collect_section(content, title, &mut ctx.registry, &ctx.config.heuristics);
        debug!(section = %section.id, recorded, "collected bibliography section");
        if !slots.iter().any(|s| matches!(s, Slot::Bibliography { .. })) {
            slots.push(Slot::Bibliography {
                title: title.to_string(),
            });
        }
        return;
    }

    let number = ctx.next_section();
    slots.push(Slot::Node(StyledNode::Heading(HeadingNode {
        level: 1,
        text: format!("{number}. {title}"),
    })));

    if let Some(content) = &section.content {
        slots.extend(classify_content(content, ctx).into_iter().map(Slot::Node));
    }
    ctx.pending_caption = None;

    for table in &section.tables {
        slots.extend(build_table(ctx, table, &section.id).into_iter().map(Slot::Node));
    }
    for (i, chart) in section.charts.iter().enumerate() {
        let key = ChartKey::new(section.id.as_str(), i + 1);
        let nodes = build_figure(ctx, &key, chart, &section.id, rasterizer).await;
        slots.extend(nodes.into_iter().map(Slot::Node));
    }
}

/// Replace the bibliography slot with the finished list.
fn reconcile(slots: Vec<Slot>, ctx: &mut ExportContext) -> Vec<StyledNode> {
    let locale = ctx.locale();
    let entries = ctx.registry.finalize(locale);
    let number = ctx.section_number + 1;
    let has_slot = slots.iter().any(|s| matches!(s, Slot::Bibliography { .. }));
    debug!(entries = entries.len(), number, "reconciled bibliography");

    let bibliography = |title: &str| -> Vec<StyledNode> {
        let mut nodes = vec![StyledNode::Heading(HeadingNode {
            level: 1,
            text: format!("{number}. {title}"),
        })];
        if !entries.is_empty() {
            nodes.push(StyledNode::List(ListNode::new(
                ListKind::Numbered,
                entries.iter().map(|e| e.text.clone()).collect(),
            )));
        }
        nodes
    };

    let mut body = Vec::new();
    for slot in slots {
        match slot {
            Slot::Node(node) => body.push(node),
            Slot::Bibliography { title } => body.extend(bibliography(&title)),
        }
    }
    if !has_slot && !entries.is_empty() {
        body.extend(bibliography(locale.bibliography_heading()));
    }
    body
}

/// Locale used for a request under `config`.
pub fn effective_locale(request: &ExportRequest, config: &ExportConfig) -> Locale {
    request.locale.unwrap_or(config.locale)
}
