//! Captioned tables and figures.
//!
//! Table and figure numbers are global to the export and live in the
//! [`ExportContext`]. Table captions go above the table, right-aligned;
//! figure captions go below the image, centered.

use tracing::debug;

use crate::context::ExportContext;
use crate::error::ExportWarning;
use crate::model::{
    Alignment, ChartSpec, ImageNode, Paragraph, StyledNode, TableCell, TableNode, TableRow,
    TableSpec,
};
use crate::patterns::TABLE_PREFIX_RE;
use crate::raster::{ChartKey, ChartRasterizer};

/// Background of header cells.
pub const HEADER_SHADING: &str = "D9D9D9";

/// Remove a leading `Table N` prefix so captions don't repeat the number.
pub fn strip_table_prefix(title: &str) -> &str {
    match TABLE_PREFIX_RE.find(title) {
        Some(m) => title[m.end()..].trim(),
        None => title.trim(),
    }
}

/// Issue the next table number and build its caption paragraph.
pub fn table_caption(ctx: &mut ExportContext, title: Option<&str>) -> Paragraph {
    let locale = ctx.locale();
    let title = title
        .map(strip_table_prefix)
        .filter(|t| !t.is_empty())
        .unwrap_or(locale.table_fallback_title());
    let number = ctx.next_table();
    Paragraph::aligned(
        format!("{} {number} – {title}", locale.table_label()),
        Alignment::Right,
    )
    .keep_with_next()
}

/// Build a table node: bold shaded header row, plain body rows.
///
/// Body rows are padded or truncated to the header width.
pub fn table_node(headers: &[String], rows: &[Vec<String>]) -> TableNode {
    let width = headers.len();
    let header = TableRow {
        cells: headers
            .iter()
            .map(|text| TableCell {
                text: text.clone(),
                bold: true,
                shading: Some(HEADER_SHADING.to_string()),
            })
            .collect(),
        is_header: true,
    };

    let body = rows.iter().map(|row| TableRow {
        cells: (0..width)
            .map(|i| TableCell {
                text: row.get(i).cloned().unwrap_or_default(),
                ..Default::default()
            })
            .collect(),
        is_header: false,
    });

    TableNode {
        rows: std::iter::once(header).chain(body).collect(),
    }
}

/// Convert a structured table into its caption and table nodes.
pub fn build_table(ctx: &mut ExportContext, spec: &TableSpec, section: &str) -> Vec<StyledNode> {
    if spec.headers.is_empty() {
        debug!(section, "skipping table without headers");
        return Vec::new();
    }
    if !spec.is_rectangular() {
        ctx.warn(ExportWarning::TableRowsNormalized {
            section: section.to_string(),
            table: spec.label().unwrap_or_default().to_string(),
        });
    }

    let caption = table_caption(ctx, spec.label());
    vec![
        StyledNode::Paragraph(caption),
        StyledNode::Table(table_node(&spec.headers, &spec.rows)),
    ]
}

/// Rasterize a chart and emit the image followed by its caption.
///
/// A rasterization failure yields a centered placeholder line and a warning;
/// the figure number is only consumed by charts that render.
pub async fn build_figure<R: ChartRasterizer>(
    ctx: &mut ExportContext,
    key: &ChartKey,
    spec: &ChartSpec,
    section: &str,
    rasterizer: &R,
) -> Vec<StyledNode> {
    let locale = ctx.locale();
    let mut chart = spec.clone();
    if chart.normalize() {
        ctx.warn(ExportWarning::ChartDataNormalized {
            section: section.to_string(),
            chart: chart.title.clone(),
        });
    }

    let size = ctx.config.chart_size;
    match rasterizer.rasterize(key, &chart, size).await {
        Ok(image) => {
            let number = ctx.next_figure();
            let label = chart.label().to_string();
            debug!(%key, number, bytes = image.data.len(), "rasterized chart");
            vec![
                StyledNode::Image(ImageNode {
                    data: image.data,
                    width_px: size.width,
                    height_px: size.height,
                    description: label.clone(),
                }),
                StyledNode::Paragraph(Paragraph::aligned(
                    format!("{} {number} – {label}", locale.figure_label()),
                    Alignment::Center,
                )),
            ]
        }
        Err(e) => {
            ctx.warn(ExportWarning::ChartFailed {
                section: section.to_string(),
                chart: chart.label().to_string(),
                reason: e.to_string(),
            });
            vec![StyledNode::Paragraph(Paragraph::aligned(
                locale.chart_unavailable(chart.label()),
                Alignment::Center,
            ))]
        }
    }
}
