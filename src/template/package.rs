//! Reading paragraphs out of a `.docx` title-page template.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::model::Alignment;
use crate::util::decode_text;

const DOCUMENT_PART: &str = "word/document.xml";

/// A run of template text with its character formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points.
    pub size: Option<u32>,
    /// Hex RGB color.
    pub color: Option<String>,
}

/// One `w:p` of the template body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParagraph {
    pub runs: Vec<TemplateRun>,
    pub alignment: Alignment,
}

impl TemplateParagraph {
    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A parsed template: the body paragraphs of `word/document.xml`.
///
/// Nothing outside this module looks at raw markup.
#[derive(Debug, Clone)]
pub struct TemplatePackage {
    paragraphs: Vec<TemplateParagraph>,
}

impl TemplatePackage {
    /// Open a `.docx` package from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut raw = Vec::new();
        match archive.by_name(DOCUMENT_PART) {
            Ok(mut file) => {
                file.read_to_end(&mut raw)?;
            }
            Err(ZipError::FileNotFound) => {
                return Err(Error::InvalidTemplate(format!("missing {DOCUMENT_PART}")));
            }
            Err(e) => return Err(e.into()),
        }

        let paragraphs = parse_document(&decode_text(&raw))?;
        if paragraphs.is_empty() {
            return Err(Error::InvalidTemplate("no paragraphs".to_string()));
        }
        Ok(Self { paragraphs })
    }

    pub fn paragraphs(&self) -> &[TemplateParagraph] {
        &self.paragraphs
    }
}

/// Parse the paragraphs of a WordprocessingML main document part.
fn parse_document(xml: &str) -> Result<Vec<TemplateParagraph>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    // Paragraphs can nest (text boxes), so keep a stack.
    let mut stack: Vec<TemplateParagraph> = Vec::new();
    let mut run: Option<TemplateRun> = None;
    let mut in_ppr = false;
    let mut in_rpr = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"p" => stack.push(TemplateParagraph::default()),
                b"pPr" => in_ppr = true,
                b"r" if !stack.is_empty() => run = Some(TemplateRun::default()),
                b"rPr" if !in_ppr => in_rpr = true,
                b"t" => in_text = run.is_some(),
                _ => apply_property(&e, &mut stack, &mut run, in_ppr, in_rpr),
            },
            Ok(Event::Empty(e)) => match local_name(e.name().as_ref()) {
                b"p" => paragraphs.push(TemplateParagraph::default()),
                b"tab" => {
                    if let Some(run) = run.as_mut() {
                        run.text.push('\t');
                    }
                }
                b"br" => {
                    if let Some(run) = run.as_mut() {
                        run.text.push(' ');
                    }
                }
                _ => apply_property(&e, &mut stack, &mut run, in_ppr, in_rpr),
            },
            Ok(Event::Text(e)) => {
                if in_text && let Some(run) = run.as_mut() {
                    run.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text && let Some(run) = run.as_mut() {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = resolve_entity(&entity) {
                        run.text.push_str(&resolved);
                    }
                }
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"rPr" => in_rpr = false,
                b"pPr" => in_ppr = false,
                b"r" => {
                    if let (Some(done), Some(paragraph)) = (run.take(), stack.last_mut()) {
                        paragraph.runs.push(done);
                    }
                }
                b"p" => {
                    if let Some(paragraph) = stack.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Apply a paragraph or run property element (`w:jc`, `w:b`, `w:i`,
/// `w:sz`, `w:color`).
fn apply_property(
    e: &BytesStart<'_>,
    stack: &mut [TemplateParagraph],
    run: &mut Option<TemplateRun>,
    in_ppr: bool,
    in_rpr: bool,
) {
    let name = e.name();
    let local = local_name(name.as_ref());
    let val = attr_val(e);

    if in_ppr && local == b"jc" {
        if let Some(paragraph) = stack.last_mut() {
            paragraph.alignment = Alignment::from_ooxml(val.as_deref().unwrap_or_default());
        }
        return;
    }

    let Some(run) = run.as_mut().filter(|_| in_rpr) else {
        return;
    };
    match local {
        b"b" => run.bold = is_on(val.as_deref()),
        b"i" => run.italic = is_on(val.as_deref()),
        b"sz" => run.size = val.and_then(|v| v.parse().ok()),
        b"color" => run.color = val.filter(|v| v != "auto"),
        _ => {}
    }
}

/// Toggle properties are on unless `w:val` says otherwise.
fn is_on(val: Option<&str>) -> bool {
    !matches!(val, Some("0" | "false" | "off"))
}

fn attr_val(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == b"val")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Extract local name from namespaced XML name (e.g., "w:p" -> "p").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}
