//! DOCX export.
//!
//! [`DocxExporter`] runs the whole pipeline: it composes the node stream
//! (see [`crate::compose`]) and serializes it to a WordprocessingML package.
//!
//! # Architecture
//!
//! The exporter uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` returns the finished file in memory
//! - `write()` streams the package to any `Write + Seek` destination
//!
//! # Example
//!
//! ```no_run
//! use paperwright::export::DocxExporter;
//! use paperwright::model::{ExportRequest, Section, TitleFields};
//! use paperwright::raster::PrerenderedCharts;
//!
//! let request = ExportRequest::new(TitleFields::new("Market Study"))
//!     .with_section(Section::new("intro", "Introduction").with_content("Text."));
//! let output = futures::executor::block_on(
//!     DocxExporter::new().export(&request, None, &PrerenderedCharts::new()),
//! )?;
//! std::fs::write(&output.file_name, &output.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{Cursor, Seek, Write};

use tracing::{error, info};

use crate::compose::{Composition, compose};
use crate::config::ExportConfig;
use crate::error::{ExportWarning, Result};
use crate::model::ExportRequest;
use crate::raster::ChartRasterizer;
use crate::util::sanitize_file_name;

mod body;
mod docx;
mod parts;

pub use body::escape_xml;
pub use docx::{write_docx, write_docx_to_writer};

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Suggested file name, derived from the document title.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub warnings: Vec<ExportWarning>,
}

/// DOCX format exporter.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter {
    config: ExportConfig,
}

impl DocxExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Collect and reconcile without serializing.
    pub async fn compose<R: ChartRasterizer>(
        &self,
        request: &ExportRequest,
        template: Option<&[u8]>,
        rasterizer: &R,
    ) -> Result<Composition> {
        compose(request, template, &self.config, rasterizer).await
    }

    /// Run the full export and return the package bytes.
    pub async fn export<R: ChartRasterizer>(
        &self,
        request: &ExportRequest,
        template: Option<&[u8]>,
        rasterizer: &R,
    ) -> Result<ExportOutput> {
        let composition = self.compose(request, template, rasterizer).await?;

        let mut cursor = Cursor::new(Vec::new());
        self.serialize(&composition, &mut cursor)?;
        let bytes = cursor.into_inner();

        let file_name = sanitize_file_name(&composition.document.title);
        info!(
            file = %file_name,
            bytes = bytes.len(),
            warnings = composition.warnings.len(),
            "exported document"
        );
        Ok(ExportOutput {
            file_name,
            bytes,
            warnings: composition.warnings,
        })
    }

    /// Run the full export and stream the package to `writer`.
    pub async fn write<R: ChartRasterizer, W: Write + Seek>(
        &self,
        request: &ExportRequest,
        template: Option<&[u8]>,
        rasterizer: &R,
        writer: &mut W,
    ) -> Result<Vec<ExportWarning>> {
        let composition = self.compose(request, template, rasterizer).await?;
        self.serialize(&composition, writer)?;
        Ok(composition.warnings)
    }

    fn serialize<W: Write + Seek>(&self, composition: &Composition, writer: &mut W) -> Result<()> {
        write_docx_to_writer(&composition.document, writer, self.config.compression_level)
            .inspect_err(|e| error!(hint = ?e.hint(), "serialization failed: {e}"))
    }
}
