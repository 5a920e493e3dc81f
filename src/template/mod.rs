//! Title page rendering.
//!
//! A user-supplied `.docx` template is used when it parses; its paragraphs
//! keep their alignment and first-run formatting while `{{FIELD}}`
//! placeholders are filled in. Anything wrong with the template falls back
//! to the built-in title page.

mod package;

pub use package::{TemplatePackage, TemplateParagraph, TemplateRun};

use tracing::debug;

use crate::error::ExportWarning;
use crate::model::{
    Alignment, DocumentStyle, Locale, Paragraph, ResolvedTitle, Run, StyledNode,
};

/// Title text size, 16 pt.
const TITLE_SIZE: u32 = 32;

/// Render the title page.
///
/// Returns the nodes and, if a template was supplied but unusable, the
/// warning explaining the fallback.
pub fn render(
    fields: &ResolvedTitle,
    style: DocumentStyle,
    locale: Locale,
    template: Option<&[u8]>,
) -> (Vec<StyledNode>, Option<ExportWarning>) {
    let Some(bytes) = template else {
        return (render_default(fields, style, locale), None);
    };

    match TemplatePackage::from_bytes(bytes) {
        Ok(package) => {
            debug!(paragraphs = package.paragraphs().len(), "using title page template");
            (render_template(&package, fields), None)
        }
        Err(e) => (
            render_default(fields, style, locale),
            Some(ExportWarning::TemplateFallback {
                reason: e.to_string(),
            }),
        ),
    }
}

/// The built-in title page.
pub fn render_default(fields: &ResolvedTitle, style: DocumentStyle, locale: Locale) -> Vec<StyledNode> {
    let mut page = Vec::new();
    let centered = |text: String| Paragraph::aligned(text, Alignment::Center);
    let right = |text: String| Paragraph::aligned(text, Alignment::Right);

    page.push(centered(fields.organization.clone()));
    if !fields.department.is_empty() {
        page.push(centered(fields.department.clone()));
    }
    page.extend(spacer(6));

    page.push(
        Paragraph::new(Alignment::Center)
            .with_run(Run::new(locale.document_type(style)).bold().with_size(TITLE_SIZE)),
    );
    if !fields.discipline.is_empty() {
        page.push(centered(locale.discipline_line(&fields.discipline)));
    }
    page.push(
        Paragraph::new(Alignment::Center)
            .with_run(Run::new(locale.quoted(&fields.title)).bold().with_size(TITLE_SIZE)),
    );
    page.extend(spacer(6));

    page.push(right(locale.author_line(&fields.author)));
    if !fields.group.is_empty() {
        page.push(right(locale.group_line(&fields.group)));
    }
    page.push(right(locale.supervisor_line(&fields.supervisor)));
    page.extend(spacer(4));

    page.push(right(format!("{} {}", fields.city, fields.year)));

    page.into_iter().map(StyledNode::Paragraph).collect()
}

fn spacer(lines: usize) -> impl Iterator<Item = Paragraph> {
    std::iter::repeat_with(Paragraph::blank).take(lines)
}

/// Fill a parsed template with field values.
pub fn render_template(package: &TemplatePackage, fields: &ResolvedTitle) -> Vec<StyledNode> {
    package
        .paragraphs()
        .iter()
        .map(|paragraph| {
            let text = substitute(&paragraph.text(), fields);
            let mut out = Paragraph::new(paragraph.alignment);
            if !text.is_empty() {
                let mut run = Run::new(text);
                if let Some(first) = paragraph.runs.first() {
                    run.bold = first.bold;
                    run.italic = first.italic;
                    run.size = first.size;
                    run.color = first.color.clone();
                }
                out = out.with_run(run);
            }
            StyledNode::Paragraph(out)
        })
        .collect()
}

/// Replace `{{FIELD}}` and `{{field}}` tokens. Unset fields become empty.
pub fn substitute(text: &str, fields: &ResolvedTitle) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }
    let mut out = text.to_string();
    for (key, value) in fields.placeholders() {
        out = out
            .replace(&format!("{{{{{key}}}}}"), value)
            .replace(&format!("{{{{{}}}}}", key.to_lowercase()), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TitleFields;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn resolved() -> ResolvedTitle {
        TitleFields::new("Market Study")
            .with_author("Jane Roe")
            .with_year("2024")
            .resolve(Locale::En)
    }

    fn template_zip(document_xml: &str) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_substitute() {
        let fields = resolved();
        assert_eq!(
            substitute("{{TITLE}} by {{author}}, {{YEAR}}{{GROUP}}", &fields),
            "Market Study by Jane Roe, 2024"
        );
        assert_eq!(substitute("{{UNKNOWN}}", &fields), "{{UNKNOWN}}");
    }

    #[test]
    fn test_default_title_page_order() {
        let nodes = render_default(&resolved(), DocumentStyle::Report, Locale::En);
        let texts: Vec<String> = nodes
            .iter()
            .filter_map(StyledNode::text)
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(texts[0], "Educational Institution");
        assert_eq!(texts[1], "REPORT");
        assert_eq!(texts[2], "\u{201C}Market Study\u{201D}");
        assert_eq!(texts[3], "Author: Jane Roe");
        assert_eq!(texts.last().unwrap(), "London 2024");
    }

    #[test]
    fn test_template_substitution_keeps_formatting() {
        let xml = r#"<w:document xmlns:w="w"><w:body>
            <w:p><w:pPr><w:jc w:val="both"/></w:pPr>
              <w:r><w:rPr><w:b/><w:sz w:val="40"/></w:rPr><w:t>{{TI</w:t></w:r>
              <w:r><w:t>TLE}}</w:t></w:r></w:p>
            <w:p><w:r><w:t>{{city}}, {{YEAR}}</w:t></w:r></w:p>
            </w:body></w:document>"#;
        let (nodes, warning) = render(
            &resolved(),
            DocumentStyle::Essay,
            Locale::En,
            Some(template_zip(xml).as_slice()),
        );
        assert!(warning.is_none());
        assert_eq!(nodes.len(), 2);
        match &nodes[0] {
            StyledNode::Paragraph(p) => {
                assert_eq!(p.alignment, Alignment::Justified);
                assert_eq!(p.text(), "Market Study");
                assert!(p.runs[0].bold);
                assert_eq!(p.runs[0].size, Some(40));
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
        assert_eq!(nodes[1].text().unwrap(), "London, 2024");
    }

    #[test]
    fn test_corrupt_template_falls_back() {
        let fields = resolved();
        let (without, none) = render(&fields, DocumentStyle::Essay, Locale::En, None);
        let (corrupt, warning) = render(
            &fields,
            DocumentStyle::Essay,
            Locale::En,
            Some(&b"PK\x03\x04 definitely not a zip"[..]),
        );
        assert!(none.is_none());
        assert_eq!(without, corrupt);
        assert!(matches!(warning, Some(ExportWarning::TemplateFallback { .. })));
    }

    #[test]
    fn test_template_without_document_part_falls_back() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let (nodes, warning) = render(&resolved(), DocumentStyle::Essay, Locale::En, Some(bytes.as_slice()));
        assert_eq!(nodes, render_default(&resolved(), DocumentStyle::Essay, Locale::En));
        let Some(ExportWarning::TemplateFallback { reason }) = warning else {
            panic!("expected fallback warning");
        };
        assert!(reason.contains("word/document.xml"));
    }
}
