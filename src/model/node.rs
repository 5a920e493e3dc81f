//! Styled node types.
//!
//! A styled node is one rendered unit (paragraph, heading, list, table,
//! image) in a format-agnostic shape. Builders produce them; only the DOCX
//! serializer turns them into markup.

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

impl Alignment {
    /// Map a WordprocessingML `w:jc` value. Unknown values become `Left`.
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "both" | "distribute" | "justify" => Alignment::Justified,
            _ => Alignment::Left,
        }
    }

    pub fn as_ooxml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justified => "both",
        }
    }
}

/// A run of text sharing one character format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points (WordprocessingML `w:sz`).
    pub size: Option<u32>,
    /// Hex RGB color without `#`.
    pub color: Option<String>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }
}

/// A block of inline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    /// Indent the first line (body text convention).
    pub first_line_indent: bool,
    /// Keep on the same page as the following node (captions above tables).
    pub keep_with_next: bool,
}

impl Paragraph {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Default::default()
        }
    }

    /// Justified body paragraph with first-line indent.
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::new(text)],
            alignment: Alignment::Justified,
            first_line_indent: true,
            keep_with_next: false,
        }
    }

    /// Single-run paragraph with the given alignment.
    pub fn aligned(text: impl Into<String>, alignment: Alignment) -> Self {
        Self::new(alignment).with_run(Run::new(text))
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn keep_with_next(mut self) -> Self {
        self.keep_with_next = true;
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// An empty spacer line.
    pub fn blank() -> Self {
        Self::default()
    }
}

/// Numbered section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    pub level: u8,
    /// Display text including the number, e.g. `"2. Analysis"`.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// A flat list. Numbered lists always restart at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub kind: ListKind,
    pub items: Vec<String>,
}

impl ListNode {
    pub fn new(kind: ListKind, items: Vec<String>) -> Self {
        Self { kind, items }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub bold: bool,
    /// Background fill as hex RGB.
    pub shading: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub is_header: bool,
}

/// A table with equal-width columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableNode {
    pub rows: Vec<TableRow>,
}

impl TableNode {
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }

    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|r| r.is_header)
    }

    pub fn body(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| !r.is_header)
    }

    /// Column width in fiftieths of a percent (`5000` is the full width).
    pub fn column_width_pct(&self) -> u32 {
        match self.column_count() {
            0 => 5000,
            n => 5000 / n as u32,
        }
    }
}

/// Embedded raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNode {
    pub data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub description: String,
}

/// One rendered unit of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyledNode {
    Paragraph(Paragraph),
    Heading(HeadingNode),
    List(ListNode),
    Table(TableNode),
    Image(ImageNode),
    /// Table of contents with the already-numbered entry titles.
    TableOfContents { title: String, entries: Vec<String> },
    PageBreak,
}

impl StyledNode {
    /// Plain text of paragraph and heading nodes.
    pub fn text(&self) -> Option<String> {
        match self {
            StyledNode::Paragraph(p) => Some(p.text()),
            StyledNode::Heading(h) => Some(h.text.clone()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            StyledNode::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableNode> {
        match self {
            StyledNode::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<Paragraph> for StyledNode {
    fn from(p: Paragraph) -> Self {
        StyledNode::Paragraph(p)
    }
}
