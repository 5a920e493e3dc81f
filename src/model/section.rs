//! Generated content as supplied by the outline generator.

use crate::patterns::BIBLIOGRAPHY_TITLE_RE;

/// One generated section of the outline.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Markdown-ish body text. Blocks are separated by blank lines.
    pub content: Option<String>,
    pub tables: Vec<TableSpec>,
    pub charts: Vec<ChartSpec>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_table(mut self, table: TableSpec) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_chart(mut self, chart: ChartSpec) -> Self {
        self.charts.push(chart);
        self
    }

    /// Whether this section holds the reference list rather than prose.
    pub fn is_bibliography(&self) -> bool {
        BIBLIOGRAPHY_TITLE_RE.is_match(&self.title.to_lowercase())
    }
}

/// Structured table data.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub title: Option<String>,
    pub caption: Option<String>,
}

impl TableSpec {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_row<S: Into<String>>(mut self, row: impl IntoIterator<Item = S>) -> Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title used for the caption: explicit title first, then caption.
    pub fn label(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.caption.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether every row has exactly as many cells as there are headers.
    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.headers.len())
    }
}

/// Kind of chart the rasterizer should draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartKind {
    Line,
    #[default]
    Bar,
    Pie,
}

/// One named data series of a chart.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// A chart description, rasterized by an external collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChartSpec {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub caption: Option<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dataset(mut self, label: impl Into<String>, data: Vec<f64>) -> Self {
        self.datasets.push(Dataset {
            label: label.into(),
            data,
        });
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Caption text for the figure: explicit caption first, then title.
    pub fn label(&self) -> &str {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.title.trim())
    }

    /// Pad or truncate every series to the label count.
    ///
    /// Returns `true` if anything had to change.
    pub fn normalize(&mut self) -> bool {
        let expected = self.labels.len();
        let mut changed = false;
        for dataset in &mut self.datasets {
            if dataset.data.len() != expected {
                dataset.data.resize(expected, 0.0);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bibliography_detection() {
        assert!(Section::new("s", "Список литературы").is_bibliography());
        assert!(Section::new("s", "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ").is_bibliography());
        assert!(Section::new("s", "Библиография").is_bibliography());
        assert!(Section::new("s", "References").is_bibliography());
        assert!(!Section::new("s", "Введение").is_bibliography());
        assert!(!Section::new("s", "Analysis").is_bibliography());
        assert!(Section::new("s", "Sources").is_bibliography());
        assert!(!Section::new("s", "Human Resources Management").is_bibliography());
        assert!(!Section::new("s", "Energy Resources").is_bibliography());
    }

    #[test]
    fn test_table_label_prefers_title() {
        let mut table = TableSpec::new(["A"]);
        assert_eq!(table.label(), None);
        table.caption = Some("Caption".into());
        assert_eq!(table.label(), Some("Caption"));
        table.title = Some("Title".into());
        assert_eq!(table.label(), Some("Title"));
    }

    #[test]
    fn test_chart_normalize() {
        let mut chart = ChartSpec::new(ChartKind::Line, "Growth")
            .with_labels(["2020", "2021", "2022"])
            .with_dataset("a", vec![1.0, 2.0])
            .with_dataset("b", vec![1.0, 2.0, 3.0, 4.0]);
        assert!(chart.normalize());
        assert_eq!(chart.datasets[0].data, vec![1.0, 2.0, 0.0]);
        assert_eq!(chart.datasets[1].data, vec![1.0, 2.0, 3.0]);
        assert!(!chart.normalize());
    }

    #[test]
    fn test_chart_label_falls_back_to_title() {
        let chart = ChartSpec::new(ChartKind::Pie, "Market share");
        assert_eq!(chart.label(), "Market share");
        let chart = chart.with_caption("Share by vendor");
        assert_eq!(chart.label(), "Share by vendor");
    }
}
