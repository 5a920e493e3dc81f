//! Title page template tests.

use std::io::{Cursor, Write};

use futures::executor::block_on;
use paperwright::model::Alignment;
use paperwright::template::TemplatePackage;
use paperwright::{DocxExporter, ExportRequest, ExportWarning, PrerenderedCharts, StyledNode, TitleFields};
use zip::write::SimpleFileOptions;

fn docx_with_body(body: &str) -> Vec<u8> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn request() -> ExportRequest {
    ExportRequest::new(
        TitleFields::new("Market Study")
            .with_organization("Northfield College")
            .with_author("Jane Roe")
            .with_city("Leeds")
            .with_year("2025"),
    )
}

// ============================================================================
// Package reading
// ============================================================================

#[test]
fn test_alignment_values() {
    let bytes = docx_with_body(
        r#"<w:p><w:pPr><w:jc w:val="start"/></w:pPr><w:r><w:t>a</w:t></w:r></w:p>
           <w:p><w:pPr><w:jc w:val="distribute"/></w:pPr><w:r><w:t>b</w:t></w:r></w:p>
           <w:p><w:pPr><w:jc w:val="end"/></w:pPr><w:r><w:t>c</w:t></w:r></w:p>
           <w:p><w:pPr><w:jc w:val="thaiDistribute"/></w:pPr><w:r><w:t>d</w:t></w:r></w:p>"#,
    );
    let package = TemplatePackage::from_bytes(&bytes).unwrap();
    let alignments: Vec<Alignment> = package.paragraphs().iter().map(|p| p.alignment).collect();
    assert_eq!(
        alignments,
        vec![
            Alignment::Left,
            Alignment::Justified,
            Alignment::Right,
            Alignment::Left
        ]
    );
}

#[test]
fn test_empty_body_is_rejected() {
    let bytes = docx_with_body("");
    assert!(TemplatePackage::from_bytes(&bytes).is_err());
}

// ============================================================================
// Rendering through the exporter
// ============================================================================

#[test]
fn test_template_title_page() {
    let template = docx_with_body(
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:i/></w:rPr><w:t>{{ORGANIZATION}}</w:t></w:r></w:p>
           <w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>{{title}}</w:t></w:r></w:p>
           <w:p><w:pPr><w:jc w:val="right"/></w:pPr><w:r><w:t>{{AUTHOR}}, group {{GROUP}}</w:t></w:r></w:p>
           <w:p><w:r><w:t>{{CITY}} {{year}}</w:t></w:r></w:p>"#,
    );
    let composition = block_on(DocxExporter::new().compose(
        &request(),
        Some(template.as_slice()),
        &PrerenderedCharts::new(),
    ))
    .unwrap();
    assert!(composition.warnings.is_empty());

    let title_page: Vec<String> = composition
        .document
        .nodes
        .iter()
        .take_while(|n| !matches!(n, StyledNode::PageBreak))
        .filter_map(StyledNode::text)
        .collect();
    assert_eq!(
        title_page,
        vec![
            "Northfield College",
            "Market Study",
            "Jane Roe, group ",
            "Leeds 2025"
        ]
    );
}

#[test]
fn test_unusable_template_matches_default() {
    let exporter = DocxExporter::new();
    let charts = PrerenderedCharts::new();
    let plain = block_on(exporter.compose(&request(), None, &charts)).unwrap();

    for bad in [
        b"not a zip at all".to_vec(),
        docx_with_body(""),
        docx_with_body("<w:p><w:r><w:t>unclosed</w:r></w:p>"),
    ] {
        let fallback = block_on(exporter.compose(&request(), Some(bad.as_slice()), &charts)).unwrap();
        assert_eq!(fallback.document.nodes, plain.document.nodes);
        assert!(matches!(
            fallback.warnings.as_slice(),
            [ExportWarning::TemplateFallback { .. }]
        ));
    }
}
