//! # paperwright
//!
//! Assemble AI-generated outline sections into a formatted DOCX document.
//!
//! ## Features
//!
//! - Title page from a built-in layout or a user `.docx` template with
//!   `{{FIELD}}` placeholders
//! - Loose generated text classified into paragraphs, lists and tables
//! - Globally numbered table and figure captions; charts rasterized through
//!   a pluggable [`ChartRasterizer`]
//! - Citation markers renumbered and reconciled into a dense bibliography
//! - Table of contents, page numbers and fixed academic page layout
//!
//! ## Quick Start
//!
//! ```no_run
//! use paperwright::{DocxExporter, ExportRequest, PrerenderedCharts, Section, TitleFields};
//!
//! let request = ExportRequest::new(TitleFields::new("Market Study").with_author("J. Roe"))
//!     .with_section(Section::new("intro", "Introduction").with_content("Demand grew [1]."))
//!     .with_section(Section::new("refs", "References").with_content("[1] Smith J. Markets. 2020."));
//!
//! let output = futures::executor::block_on(
//!     DocxExporter::new().export(&request, None, &PrerenderedCharts::new()),
//! )
//! .unwrap();
//! std::fs::write(&output.file_name, &output.bytes).unwrap();
//! ```
//!
//! ## Inspecting the node stream
//!
//! ```
//! use paperwright::{DocxExporter, ExportRequest, PrerenderedCharts, Section, TitleFields};
//!
//! let request = ExportRequest::new(TitleFields::new("Notes"))
//!     .with_section(Section::new("a", "Overview").with_content("- one\n- two"));
//! let composition = futures::executor::block_on(
//!     DocxExporter::new().compose(&request, None, &PrerenderedCharts::new()),
//! )
//! .unwrap();
//! assert_eq!(composition.document.headings().next(), Some("1. Overview"));
//! ```

pub mod bibliography;
pub mod classify;
pub mod compose;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod figures;
pub mod model;
pub(crate) mod patterns;
pub mod raster;
pub mod template;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use compose::{Composition, compose};
pub use config::ExportConfig;
pub use error::{Error, ExportWarning, FailureHint, Result};
pub use export::{DocxExporter, ExportOutput, write_docx, write_docx_to_writer};
pub use model::{
    ChartKind, ChartSpec, Document, DocumentStyle, ExportRequest, Locale, Section, StyledNode,
    TableSpec, TitleFields,
};
pub use raster::{ChartKey, ChartRasterizer, PrerenderedCharts, RasterError, RasterImage, RasterSize};
