//! Core data model for document assembly.
//!
//! This module contains:
//! - Generated content (sections, table and chart specs)
//! - Title-page fields, document style and locale labels
//! - Styled nodes, the format-agnostic output of every builder
//! - The assembled [`Document`] handed to the serializer

mod document;
mod locale;
mod node;
mod section;
mod title;

pub use document::{Document, ExportRequest};
pub use locale::Locale;
pub use node::{
    Alignment, HeadingNode, ImageNode, ListKind, ListNode, Paragraph, Run, StyledNode, TableCell,
    TableNode, TableRow,
};
pub use section::{ChartKind, ChartSpec, Dataset, Section, TableSpec};
pub use title::{DocumentStyle, ResolvedTitle, TitleFields};
