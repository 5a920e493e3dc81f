//! Chart rasterization boundary.
//!
//! Drawing charts is left to an external collaborator (a canvas in the
//! browser, a plotting service, pre-rendered files). The core only needs the
//! PNG bytes; it lays the image out at the size it asked for.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::model::ChartSpec;

/// Pixel dimensions requested from the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl Default for RasterSize {
    fn default() -> Self {
        Self {
            width: 600,
            height: 360,
        }
    }
}

/// Identifies a chart within the request: owning section and 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartKey {
    pub section_id: String,
    pub index: usize,
}

impl ChartKey {
    pub fn new(section_id: impl Into<String>, index: usize) -> Self {
        Self {
            section_id: section_id.into(),
            index,
        }
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section_id, self.index)
    }
}

/// PNG bytes returned by a rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Decode a base64 payload, with or without a `data:` URL prefix.
    pub fn from_base64(payload: &str) -> Result<Self, RasterError> {
        let encoded = match payload.split_once(";base64,") {
            Some((_, rest)) => rest,
            None => payload,
        };
        let data = STANDARD.decode(encoded.trim())?;
        if data.is_empty() {
            return Err(RasterError::Empty);
        }
        Ok(Self { data })
    }
}

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("no image available for chart {0}")]
    NotAvailable(String),

    #[error("invalid base64 image: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("empty image")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Turns a chart spec into a raster image.
///
/// Each call is a suspension point of the export; failures are contained to
/// the one figure.
#[allow(async_fn_in_trait)]
pub trait ChartRasterizer {
    async fn rasterize(
        &self,
        key: &ChartKey,
        chart: &ChartSpec,
        size: RasterSize,
    ) -> Result<RasterImage, RasterError>;
}

/// Charts rendered ahead of time, looked up by [`ChartKey`].
///
/// Used by the CLI (PNG files on disk) and the WASM binding (base64 strings
/// from browser canvases). Missing charts fail with
/// [`RasterError::NotAvailable`].
#[derive(Debug, Clone, Default)]
pub struct PrerenderedCharts {
    images: HashMap<String, Vec<u8>>,
}

impl PrerenderedCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, png: Vec<u8>) {
        self.images.insert(key.into(), png);
    }

    pub fn insert_base64(&mut self, key: impl Into<String>, payload: &str) -> Result<(), RasterError> {
        let image = RasterImage::from_base64(payload)?;
        self.images.insert(key.into(), image.data);
        Ok(())
    }

    /// Load every `*.png` in `dir`, keyed by file stem (`<section-id>-<index>`).
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, RasterError> {
        let mut charts = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if !is_png {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                charts.insert(stem.to_string_lossy(), std::fs::read(&path)?);
            }
        }
        Ok(charts)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ChartRasterizer for PrerenderedCharts {
    async fn rasterize(
        &self,
        key: &ChartKey,
        _chart: &ChartSpec,
        _size: RasterSize,
    ) -> Result<RasterImage, RasterError> {
        let key = key.to_string();
        match self.images.get(&key) {
            Some(data) if !data.is_empty() => Ok(RasterImage { data: data.clone() }),
            Some(_) => Err(RasterError::Empty),
            None => Err(RasterError::NotAvailable(key)),
        }
    }
}
