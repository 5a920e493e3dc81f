//! `word/document.xml` generation.

use crate::model::{
    Alignment, HeadingNode, ImageNode, ListKind, ListNode, Paragraph, Run, StyledNode, TableNode,
};

use super::parts::{
    BULLET_NUM_ID, FIRST_LINE_INDENT, FOOTER_REL_ID, PAGE_HEIGHT, PAGE_WIDTH, TEXT_WIDTH,
    image_rel_id, numbered_num_id,
};

/// EMU per twip.
const EMU_PER_TWIP: u64 = 635;

/// The rendered main document part and what it refers to.
#[derive(Debug, Default)]
pub(crate) struct BodyPart {
    pub xml: String,
    /// PNG payloads, stored as `word/media/image{n}.png` (1-based).
    pub media: Vec<Vec<u8>>,
    /// Numbered lists, each with its own restarting numbering instance.
    pub numbered_lists: u32,
}

/// Render the document body.
pub(crate) fn render_body(nodes: &[StyledNode]) -> BodyPart {
    let mut part = BodyPart::default();
    let mut body = String::new();

    for node in nodes {
        match node {
            StyledNode::Paragraph(p) => write_paragraph(&mut body, p),
            StyledNode::Heading(h) => write_heading(&mut body, h),
            StyledNode::List(list) => write_list(&mut body, list, &mut part.numbered_lists),
            StyledNode::Table(table) => write_table(&mut body, table),
            StyledNode::Image(image) => {
                part.media.push(image.data.clone());
                write_image(&mut body, image, part.media.len());
            }
            StyledNode::TableOfContents { title, entries } => write_toc(&mut body, title, entries),
            StyledNode::PageBreak => body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }

    part.xml = format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
            r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            "<w:body>{body}{sect}</w:body></w:document>"
        ),
        body = body,
        sect = section_properties(),
    );
    part
}

fn section_properties() -> String {
    format!(
        concat!(
            r#"<w:sectPr><w:footerReference w:type="default" r:id="{footer}"/>"#,
            r#"<w:pgSz w:w="{width}" w:h="{height}"/>"#,
            r#"<w:pgMar w:top="1134" w:right="851" w:bottom="1134" w:left="1701" "#,
            r#"w:header="709" w:footer="709" w:gutter="0"/>"#,
            r#"<w:titlePg/></w:sectPr>"#
        ),
        footer = FOOTER_REL_ID,
        width = PAGE_WIDTH,
        height = PAGE_HEIGHT,
    )
}

// ============================================================================
// Paragraphs
// ============================================================================

fn write_paragraph(out: &mut String, p: &Paragraph) {
    out.push_str("<w:p>");
    let mut ppr = String::new();
    if p.keep_with_next {
        ppr.push_str("<w:keepNext/>");
    }
    if p.first_line_indent {
        ppr.push_str(&format!(r#"<w:ind w:firstLine="{FIRST_LINE_INDENT}"/>"#));
    }
    if p.alignment != Alignment::Left {
        ppr.push_str(&format!(r#"<w:jc w:val="{}"/>"#, p.alignment.as_ooxml()));
    }
    if !ppr.is_empty() {
        out.push_str("<w:pPr>");
        out.push_str(&ppr);
        out.push_str("</w:pPr>");
    }
    for run in &p.runs {
        write_run(out, run);
    }
    out.push_str("</w:p>");
}

fn write_run(out: &mut String, run: &Run) {
    out.push_str("<w:r>");
    let mut rpr = String::new();
    if run.bold {
        rpr.push_str("<w:b/>");
    }
    if run.italic {
        rpr.push_str("<w:i/>");
    }
    if let Some(color) = &run.color {
        rpr.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape_xml(color)));
    }
    if let Some(size) = run.size {
        rpr.push_str(&format!(r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#));
    }
    if !rpr.is_empty() {
        out.push_str("<w:rPr>");
        out.push_str(&rpr);
        out.push_str("</w:rPr>");
    }
    write_text(out, &run.text);
    out.push_str("</w:r>");
}

/// Text content of a run; tabs become `w:tab`.
fn write_text(out: &mut String, text: &str) {
    for (i, piece) in text.split('\t').enumerate() {
        if i > 0 {
            out.push_str("<w:tab/>");
        }
        if !piece.is_empty() {
            out.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape_xml(piece)
            ));
        }
    }
}

fn write_heading(out: &mut String, h: &HeadingNode) {
    out.push_str(&format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading{}"/></w:pPr><w:r>"#,
        h.level.clamp(1, 3)
    ));
    write_text(out, &h.text);
    out.push_str("</w:r></w:p>");
}

// ============================================================================
// Lists
// ============================================================================

fn write_list(out: &mut String, list: &ListNode, numbered_lists: &mut u32) {
    let num_id = match list.kind {
        ListKind::Bulleted => BULLET_NUM_ID,
        ListKind::Numbered => {
            *numbered_lists += 1;
            numbered_num_id(*numbered_lists)
        }
    };
    for item in &list.items {
        out.push_str(&format!(
            concat!(
                r#"<w:p><w:pPr><w:pStyle w:val="ListParagraph"/>"#,
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
                r#"<w:jc w:val="both"/></w:pPr><w:r>"#
            ),
            num_id
        ));
        write_text(out, item);
        out.push_str("</w:r></w:p>");
    }
}

// ============================================================================
// Tables
// ============================================================================

fn write_table(out: &mut String, table: &TableNode) {
    let columns = table.column_count().max(1) as u32;
    let pct = table.column_width_pct();
    let grid = TEXT_WIDTH / columns;

    out.push_str(concat!(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/>"#,
        r#"<w:tblW w:w="5000" w:type="pct"/><w:tblLayout w:type="fixed"/></w:tblPr>"#,
        "<w:tblGrid>"
    ));
    for _ in 0..columns {
        out.push_str(&format!(r#"<w:gridCol w:w="{grid}"/>"#));
    }
    out.push_str("</w:tblGrid>");

    for row in &table.rows {
        out.push_str("<w:tr>");
        if row.is_header {
            out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for cell in &row.cells {
            out.push_str(&format!(r#"<w:tc><w:tcPr><w:tcW w:w="{pct}" w:type="pct"/>"#));
            if let Some(fill) = &cell.shading {
                out.push_str(&format!(
                    r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
                    escape_xml(fill)
                ));
            }
            out.push_str(r#"</w:tcPr><w:p><w:pPr><w:pStyle w:val="TableText"/></w:pPr><w:r>"#);
            if cell.bold {
                out.push_str("<w:rPr><w:b/></w:rPr>");
            }
            write_text(out, &cell.text);
            out.push_str("</w:r></w:p></w:tc>");
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
    // Word needs a paragraph between a table and whatever follows.
    out.push_str("<w:p/>");
}

// ============================================================================
// Images
// ============================================================================

/// Extent in EMU: the full text width, keeping the pixel aspect ratio.
fn image_extent(image: &ImageNode) -> (u64, u64) {
    let cx = TEXT_WIDTH as u64 * EMU_PER_TWIP;
    let width = image.width_px.max(1) as u64;
    let cy = cx * image.height_px as u64 / width;
    (cx, cy)
}

fn write_image(out: &mut String, image: &ImageNode, index: usize) {
    let (cx, cy) = image_extent(image);
    let descr = escape_xml(&image.description);
    out.push_str(&format!(
        concat!(
            r#"<w:p><w:pPr><w:keepNext/><w:jc w:val="center"/></w:pPr><w:r><w:drawing>"#,
            r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:docPr id="{index}" name="Figure {index}" descr="{descr}"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{index}" name="image{index}.png"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
            r#"</a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#
        ),
        cx = cx,
        cy = cy,
        index = index,
        descr = descr,
        rel = image_rel_id(index),
    ));
}

// ============================================================================
// Table of contents
// ============================================================================

/// TOC field over level-1 headings, with the entries cached so the list is
/// readable before Word refreshes the field.
fn write_toc(out: &mut String, title: &str, entries: &[String]) {
    out.push_str(r#"<w:p><w:pPr><w:pStyle w:val="TOCHeading"/></w:pPr><w:r>"#);
    write_text(out, title);
    out.push_str("</w:r></w:p>");

    let begin = concat!(
        r#"<w:r><w:fldChar w:fldCharType="begin" w:dirty="true"/></w:r>"#,
        r#"<w:r><w:instrText xml:space="preserve"> TOC \o "1-1" \h \z \u </w:instrText></w:r>"#,
        r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#
    );
    let end = r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#;
    let toc_paragraph = r#"<w:p><w:pPr><w:pStyle w:val="TOC1"/></w:pPr>"#;

    if entries.is_empty() {
        out.push_str(toc_paragraph);
        out.push_str(begin);
        out.push_str(end);
        out.push_str("</w:p>");
        return;
    }

    let last = entries.len() - 1;
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(toc_paragraph);
        if i == 0 {
            out.push_str(begin);
        }
        out.push_str("<w:r>");
        write_text(out, entry);
        out.push_str("</w:r>");
        if i == last {
            out.push_str(end);
        }
        out.push_str("</w:p>");
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            // Control characters are not allowed in XML 1.0.
            c if c.is_control() && c != '\n' && c != '\r' && c != '\t' => {}
            _ => result.push(c),
        }
    }
    result
}
