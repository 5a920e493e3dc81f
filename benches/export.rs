//! Benchmarks for the export pipeline.
//!
//! Run with: cargo bench

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures::executor::block_on;

use paperwright::classify::split_blocks;
use paperwright::{
    ChartKind, ChartSpec, DocxExporter, ExportConfig, ExportRequest, PrerenderedCharts, Section,
    TableSpec, TitleFields, compose, write_docx_to_writer,
};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A generated-looking section: prose with citations, a list, a pipe table
/// and a bibliography run tucked at the end.
fn section_content(n: usize) -> String {
    format!(
        "**Overview {n}**\n\n\
         Demand for the product grew steadily over the period [{a}], while \
         margins narrowed under price pressure [{b}].\n\n\
         - Market share rose in the north\n\
         - Costs stayed flat\n\
         - Churn fell by a third\n\n\
         1. Collect the data\n\
         2. Compare the regions\n\n\
         Table {n}: Regional results\n\
         | Region | Revenue | Growth |\n\
         |---|---|---|\n\
         | North | 120 | 4% |\n\
         | South | 95 | 2% |\n\n\
         [{a}] Smith J. Market dynamics. Journal of Trade, 2020.\n\
         [{b}] Doe A. Pricing under pressure. Oxford, 2019.",
        a = n * 2 + 1,
        b = n * 2 + 2,
    )
}

fn sample_request(sections: usize) -> ExportRequest {
    let mut request = ExportRequest::new(
        TitleFields::new("Regional Market Study")
            .with_author("J. Roe")
            .with_year("2025"),
    );
    for n in 0..sections {
        request = request.with_section(
            Section::new(format!("s{n}"), format!("Part {n}"))
                .with_content(section_content(n))
                .with_table(
                    TableSpec::new(["Year", "Units"])
                        .with_row(["2023", "10"])
                        .with_row(["2024", "14"])
                        .with_title("Units sold"),
                )
                .with_chart(
                    ChartSpec::new(ChartKind::Bar, "Units by year")
                        .with_labels(["2023", "2024"])
                        .with_dataset("Units", vec![10.0, 14.0]),
                ),
        );
    }
    request.with_section(Section::new("refs", "References"))
}

fn sample_charts(sections: usize) -> PrerenderedCharts {
    let mut charts = PrerenderedCharts::new();
    for n in 0..sections {
        charts.insert(format!("s{n}-1"), PNG.to_vec());
    }
    charts
}

// ============================================================================
// Classification Benchmarks
// ============================================================================

fn bench_split_blocks(c: &mut Criterion) {
    let content: String = (0..50).map(section_content).collect::<Vec<_>>().join("\n\n");

    c.bench_function("split_blocks", |b| {
        b.iter(|| split_blocks(&content));
    });
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_compose(c: &mut Criterion) {
    let config = ExportConfig::default();
    let mut group = c.benchmark_group("compose");

    for sections in [5, 50] {
        let request = sample_request(sections);
        let charts = sample_charts(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &sections, |b, _| {
            b.iter(|| block_on(compose(&request, None, &config, &charts)).unwrap());
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let request = sample_request(20);
    let charts = sample_charts(20);
    let composition =
        block_on(compose(&request, None, &ExportConfig::default(), &charts)).unwrap();

    c.bench_function("serialize_docx", |b| {
        b.iter(|| {
            let mut output = Cursor::new(Vec::new());
            write_docx_to_writer(&composition.document, &mut output, None).unwrap();
        });
    });
}

fn bench_export(c: &mut Criterion) {
    let exporter = DocxExporter::new();
    let request = sample_request(20);
    let charts = sample_charts(20);

    c.bench_function("export_docx", |b| {
        b.iter(|| block_on(exporter.export(&request, None, &charts)).unwrap());
    });
}

criterion_group!(classify, bench_split_blocks);
criterion_group!(pipeline, bench_compose, bench_serialize, bench_export);
criterion_main!(classify, pipeline);
