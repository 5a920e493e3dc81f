//! End-to-end export tests.
//!
//! Build requests the way the generator hands them over, run the full
//! export and look inside the resulting package.

use std::io::{Cursor, Read};

use futures::executor::block_on;
use paperwright::model::{Dataset, ListKind};
use paperwright::{
    ChartKind, ChartSpec, DocxExporter, Error, ExportRequest, ExportWarning, PrerenderedCharts,
    Section, StyledNode, TableSpec, TitleFields,
};
use zip::ZipArchive;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn three_section_request() -> ExportRequest {
    ExportRequest::new(
        TitleFields::new("Анализ рынка")
            .with_author("Иванов И.И.")
            .with_year("2024"),
    )
    .with_section(
        Section::new("intro", "Введение")
            .with_content("Рынок растёт уже несколько лет [1].\n\nПрогнозы остаются осторожными [2]."),
    )
    .with_section(
        Section::new("analysis", "Анализ")
            .with_content("Основные показатели приведены ниже.")
            .with_table(
                TableSpec::new(["Год", "Выручка"])
                    .with_row(["2022", "10"])
                    .with_row(["2023", "12"])
                    .with_title("Выручка по годам"),
            )
            .with_chart(
                ChartSpec::new(ChartKind::Line, "Динамика выручки")
                    .with_labels(["2022", "2023"])
                    .with_dataset("Выручка", vec![10.0, 12.0]),
            ),
    )
    .with_section(
        Section::new("refs", "Список литературы")
            .with_content("[1] Smith 2020.\n[2] Doe 2019."),
    )
}

fn charts() -> PrerenderedCharts {
    let mut charts = PrerenderedCharts::new();
    charts.insert("analysis-1", PNG.to_vec());
    charts
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut text = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    text
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_three_section_scenario() {
    let composition = block_on(DocxExporter::new().compose(
        &three_section_request(),
        None,
        &charts(),
    ))
    .unwrap();
    let doc = &composition.document;

    let headings: Vec<&str> = doc.headings().collect();
    assert_eq!(
        headings,
        vec!["1. Введение", "2. Анализ", "3. Список литературы"]
    );

    let bibliography = doc
        .nodes
        .iter()
        .filter_map(StyledNode::as_list)
        .find(|list| list.kind == ListKind::Numbered)
        .unwrap();
    assert_eq!(bibliography.items, vec!["Smith 2020.", "Doe 2019."]);

    let texts = doc.paragraph_texts();
    let table_captions: Vec<_> = texts.iter().filter(|t| t.starts_with("Table ")).collect();
    let figure_captions: Vec<_> = texts.iter().filter(|t| t.starts_with("Figure ")).collect();
    assert_eq!(table_captions, vec!["Table 1 – Выручка по годам"]);
    assert_eq!(figure_captions, vec!["Figure 1 – Динамика выручки"]);

    assert!(composition.warnings.is_empty());
}

#[test]
fn test_node_order() {
    let composition =
        block_on(DocxExporter::new().compose(&three_section_request(), None, &charts())).unwrap();
    let nodes = &composition.document.nodes;

    let page_break = nodes
        .iter()
        .position(|n| matches!(n, StyledNode::PageBreak))
        .unwrap();
    assert!(matches!(
        nodes[page_break + 1],
        StyledNode::TableOfContents { .. }
    ));
    assert!(matches!(nodes[page_break + 2], StyledNode::Heading(_)));

    // Table caption sits directly above its table, figure caption below its image.
    let table = nodes
        .iter()
        .position(|n| matches!(n, StyledNode::Table(_)))
        .unwrap();
    assert!(nodes[table - 1].text().unwrap().starts_with("Table 1"));
    let image = nodes
        .iter()
        .position(|n| matches!(n, StyledNode::Image(_)))
        .unwrap();
    assert!(nodes[image + 1].text().unwrap().starts_with("Figure 1"));
    assert!(image > table);
}

#[test]
fn test_missing_title_field() {
    let request = ExportRequest::new(TitleFields::new("   "));
    let result = block_on(DocxExporter::new().export(&request, None, &PrerenderedCharts::new()));
    match result {
        Err(Error::MissingField { field }) => assert_eq!(field, "title"),
        other => panic!("expected missing field error, got {other:?}"),
    }
}

#[test]
fn test_missing_chart_is_contained() {
    let composition = block_on(DocxExporter::new().compose(
        &three_section_request(),
        None,
        &PrerenderedCharts::new(),
    ))
    .unwrap();

    let texts = composition.document.paragraph_texts();
    assert!(!texts.iter().any(|t| t.starts_with("Figure ")));
    assert!(texts.iter().any(|t| t.contains("Динамика выручки")));
    assert!(matches!(
        composition.warnings.as_slice(),
        [ExportWarning::ChartFailed { section, .. }] if section == "analysis"
    ));
}

#[test]
fn test_mismatched_chart_data_warns() {
    let request = ExportRequest::new(TitleFields::new("T")).with_section(
        Section::new("s", "Data").with_chart(ChartSpec {
            labels: vec!["a".into(), "b".into(), "c".into()],
            datasets: vec![Dataset {
                label: "x".into(),
                data: vec![1.0],
            }],
            ..ChartSpec::new(ChartKind::Bar, "Short")
        }),
    );
    let mut charts = PrerenderedCharts::new();
    charts.insert("s-1", PNG.to_vec());

    let composition = block_on(DocxExporter::new().compose(&request, None, &charts)).unwrap();
    assert!(matches!(
        composition.warnings.as_slice(),
        [ExportWarning::ChartDataNormalized { .. }]
    ));
}

// ============================================================================
// Package
// ============================================================================

#[test]
fn test_package_contents() {
    let output =
        block_on(DocxExporter::new().export(&three_section_request(), None, &charts())).unwrap();
    assert_eq!(output.file_name, "Анализ рынка.docx");

    let document = read_part(&output.bytes, "word/document.xml");
    assert!(document.contains("1. Введение"));
    assert!(document.contains("Table 1 – Выручка по годам"));
    assert!(document.contains("Figure 1 – Динамика выручки"));
    assert!(document.contains(r#"w:fill="D9D9D9""#));
    assert!(document.contains(r#"TOC \o "1-1""#));
    assert!(document.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));

    let numbering = read_part(&output.bytes, "word/numbering.xml");
    assert_eq!(numbering.matches("<w:startOverride").count(), 1);

    let settings = read_part(&output.bytes, "word/settings.xml");
    assert!(settings.contains("<w:updateFields"));

    let rels = read_part(&output.bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains("media/image1.png"));

    let mut archive = ZipArchive::new(Cursor::new(&output.bytes)).unwrap();
    let mut png = Vec::new();
    archive
        .by_name("word/media/image1.png")
        .unwrap()
        .read_to_end(&mut png)
        .unwrap();
    assert_eq!(png, PNG);
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");
    let mut file = std::fs::File::create(&path).unwrap();

    let warnings = block_on(DocxExporter::new().write(
        &three_section_request(),
        None,
        &charts(),
        &mut file,
    ))
    .unwrap();
    assert!(warnings.is_empty());

    let bytes = std::fs::read(&path).unwrap();
    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Анализ рынка</dc:title>"));
    assert!(core.contains("<dc:creator>Иванов И.И.</dc:creator>"));
}

#[test]
fn test_charts_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("analysis-1.png"), PNG).unwrap();
    let charts = PrerenderedCharts::from_dir(dir.path()).unwrap();

    let output =
        block_on(DocxExporter::new().export(&three_section_request(), None, &charts)).unwrap();
    assert!(output.warnings.is_empty());
}

// ============================================================================
// Request JSON
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_request_from_json() {
    let json = r#"{
        "title_page": { "title": "Market Study", "author": "J. Roe" },
        "style": "coursework",
        "locale": "ru",
        "sections": [
            { "id": "a", "title": "Intro", "content": "Text [1]." },
            { "id": "b", "title": "Data", "charts": [
                { "type": "pie", "title": "Share", "labels": ["x", "y"],
                  "datasets": [{ "label": "s", "data": [1, 2] }] }
            ] }
        ]
    }"#;
    let request: ExportRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.fields.title, "Market Study");
    assert_eq!(request.sections[1].charts[0].kind, ChartKind::Pie);

    let composition =
        block_on(DocxExporter::new().compose(&request, None, &PrerenderedCharts::new())).unwrap();
    let headings: Vec<&str> = composition.document.headings().collect();
    assert_eq!(headings, vec!["1. Intro", "2. Data", "3. Список литературы"]);
}
