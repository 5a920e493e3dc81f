//! DOCX package writer.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::model::Document;

use super::body::render_body;
use super::parts;

/// Write `document` as a `.docx` package.
///
/// `compression_level` is the deflate level (0-9, default 6).
pub fn write_docx_to_writer<W: Write + Seek>(
    document: &Document,
    writer: W,
    compression_level: Option<u32>,
) -> Result<()> {
    let body = render_body(&document.nodes);
    let mut zip = ZipWriter::new(writer);

    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(compression_level.unwrap_or(6).min(9) as i64));
    // PNG data is already compressed.
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // [Content_Types].xml goes first by convention
    zip.start_file("[Content_Types].xml", deflated)?;
    zip.write_all(parts::content_types(!body.media.is_empty()).as_bytes())?;

    zip.start_file("_rels/.rels", deflated)?;
    zip.write_all(parts::ROOT_RELS)?;

    let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    zip.start_file("docProps/core.xml", deflated)?;
    zip.write_all(
        parts::core_properties(
            &document.title,
            &document.author,
            &document.language,
            &created,
        )
        .as_bytes(),
    )?;

    zip.start_file("docProps/app.xml", deflated)?;
    zip.write_all(parts::app_properties().as_bytes())?;

    zip.start_file("word/document.xml", deflated)?;
    zip.write_all(body.xml.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", deflated)?;
    zip.write_all(parts::document_rels(body.media.len()).as_bytes())?;

    zip.start_file("word/styles.xml", deflated)?;
    zip.write_all(parts::styles(&document.language).as_bytes())?;

    zip.start_file("word/numbering.xml", deflated)?;
    zip.write_all(parts::numbering(body.numbered_lists).as_bytes())?;

    zip.start_file("word/settings.xml", deflated)?;
    zip.write_all(parts::SETTINGS)?;

    zip.start_file("word/footer1.xml", deflated)?;
    zip.write_all(parts::FOOTER)?;

    for (i, png) in body.media.iter().enumerate() {
        zip.start_file(format!("word/media/image{}.png", i + 1), stored)?;
        zip.write_all(png)?;
    }

    zip.finish()?;
    Ok(())
}

/// Write `document` to a file at `path`.
pub fn write_docx<P: AsRef<Path>>(
    document: &Document,
    path: P,
    compression_level: Option<u32>,
) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_docx_to_writer(document, &mut file, compression_level)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, StyledNode};
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn sample() -> Document {
        Document {
            title: "Sample".into(),
            author: "A. Author".into(),
            language: "en-US".into(),
            nodes: vec![StyledNode::Paragraph(Paragraph::body("Hello"))],
        }
    }

    #[test]
    fn test_package_parts() {
        let mut cursor = Cursor::new(Vec::new());
        write_docx_to_writer(&sample(), &mut cursor, None).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/numbering.xml",
            "word/settings.xml",
            "word/footer1.xml",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {name}");
        }

        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        assert!(core.contains("<dc:title>Sample</dc:title>"));
    }

    #[test]
    fn test_write_docx_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        write_docx(&sample(), &path, Some(9)).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
