//! Export configuration.

use crate::bibliography::SourceHeuristics;
use crate::model::Locale;
use crate::raster::RasterSize;

/// Configuration for one export.
///
/// Page layout, fonts and heading styles are fixed; only labels, the
/// bibliography heuristics and packaging options are tunable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportConfig {
    /// Language of captions, placeholders and title-page defaults.
    pub locale: Locale,
    /// Rules for accepting source-looking lines.
    pub heuristics: SourceHeuristics,
    /// Drop bibliography entries whose normalized text was already recorded.
    pub dedupe_bibliography: bool,
    /// Pixel size requested from the chart rasterizer.
    pub chart_size: RasterSize,
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            heuristics: SourceHeuristics::default(),
            dedupe_bibliography: true,
            chart_size: RasterSize::default(),
            compression_level: None,
        }
    }
}

impl ExportConfig {
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_heuristics(mut self, heuristics: SourceHeuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_chart_size(mut self, size: RasterSize) -> Self {
        self.chart_size = size;
        self
    }
}
