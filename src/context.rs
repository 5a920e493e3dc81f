//! Mutable state of a single export.

use tracing::warn;

use crate::bibliography::CitationRegistry;
use crate::config::ExportConfig;
use crate::error::ExportWarning;
use crate::model::Locale;

/// Counters and maps owned by one export call.
///
/// Created fresh for every export and dropped with it, so concurrent exports
/// never share numbering.
#[derive(Debug)]
pub struct ExportContext {
    pub config: ExportConfig,
    pub registry: CitationRegistry,
    /// Id of the section being collected, for warnings.
    pub section_id: String,
    /// Last visible section number issued.
    pub section_number: u32,
    /// Last table caption number issued.
    pub table_number: u32,
    /// Last figure caption number issued.
    pub figure_number: u32,
    /// Caption title found in front of a pipe table, waiting for the table.
    pub pending_caption: Option<String>,
    pub warnings: Vec<ExportWarning>,
}

impl ExportContext {
    pub fn new(config: ExportConfig) -> Self {
        let registry = CitationRegistry::new().with_dedupe(config.dedupe_bibliography);
        Self {
            config,
            registry,
            section_id: String::new(),
            section_number: 0,
            table_number: 0,
            figure_number: 0,
            pending_caption: None,
            warnings: Vec::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn next_section(&mut self) -> u32 {
        self.section_number += 1;
        self.section_number
    }

    pub fn next_table(&mut self) -> u32 {
        self.table_number += 1;
        self.table_number
    }

    pub fn next_figure(&mut self) -> u32 {
        self.figure_number += 1;
        self.figure_number
    }

    /// Record a non-fatal problem.
    pub fn warn(&mut self, warning: ExportWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

impl Default for ExportContext {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}
