//! Typed chart descriptions for the four dashboard widgets.
//!
//! Builders produce a `ChartSpec` from already-validated input; `to_config`
//! turns it into the `{type, data, options}` payload of the charting library.

pub mod compliance;
mod config;
pub mod gauge;
pub mod severity;
pub mod trend;

pub use compliance::{ComplianceBreakdown, ComplianceCounts, compliance_status_spec};
pub use config::{
    AxisOptions, ChartConfig, ChartData, ChartOptions, Dataset, PaintSpec, PluginOptions,
    ScaleOptions, TickOptions, Toggle,
};
pub use gauge::{GaugeChart, ScoreOverlay, security_score_chart};
pub use severity::{SeverityCounts, vulnerability_severity_spec};
pub use trend::{TrendSeries, threat_trend_spec};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;
use crate::error::{DashboardError, DashboardResult};

/// Chart families used on the dashboard, tagged with the library type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Ring gauge, drawn by the library as a doughnut.
    #[serde(rename = "doughnut")]
    Gauge,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "pie")]
    Pie,
    #[serde(rename = "bar")]
    StackedBar,
}

/// Where the numbers in a chart came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataProvenance {
    Measured,
    /// Figures fabricated for display; not fit for reporting.
    Placeholder,
}

/// One named series.
///
/// `colors` holds one color per slice for gauge and pie charts, the
/// `[border, fill]` pair for line charts, and a single fill for bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,
    pub values: Vec<f64>,
    pub colors: SmallVec<[Color; 4]>,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            colors: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.colors.push(color);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.colors.extend(colors);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<SeriesSpec>,
    pub provenance: DataProvenance,
}

impl ChartSpec {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            series: Vec::new(),
            provenance: DataProvenance::Measured,
        }
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: SeriesSpec) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_provenance(mut self, provenance: DataProvenance) -> Self {
        self.provenance = provenance;
        self
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.provenance == DataProvenance::Placeholder
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.series.is_empty() {
            return Err(DashboardError::InvalidData(
                "chart must have at least one series".to_owned(),
            ));
        }
        for series in &self.series {
            if series.values.iter().any(|value| !value.is_finite()) {
                return Err(DashboardError::InvalidData(format!(
                    "series `{}` contains non-finite values",
                    series.name
                )));
            }
            if !self.labels.is_empty() && series.values.len() != self.labels.len() {
                return Err(DashboardError::InvalidData(format!(
                    "series `{}` has {} values for {} labels",
                    series.name,
                    series.values.len(),
                    self.labels.len()
                )));
            }
            for color in &series.colors {
                color.validate()?;
            }
        }
        Ok(())
    }
}
