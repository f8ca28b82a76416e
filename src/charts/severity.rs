use serde::{Deserialize, Serialize};

use crate::charts::{ChartKind, ChartSpec, SeriesSpec};
use crate::core::Palette;

/// Finding counts per severity, as served by the stats endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: u32,
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub low: u32,
}

impl SeverityCounts {
    #[must_use]
    pub fn new(critical: u32, high: u32, medium: u32, low: u32) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        [self.critical, self.high, self.medium, self.low]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}

pub const SEVERITY_LABELS: [&str; 4] = ["Critical", "High", "Medium", "Low"];

/// Four-slice pie; slice colors go danger, warning, info, success.
#[must_use]
pub fn vulnerability_severity_spec(counts: SeverityCounts, palette: &Palette) -> ChartSpec {
    let values = [counts.critical, counts.high, counts.medium, counts.low]
        .into_iter()
        .map(f64::from)
        .collect();
    let series = SeriesSpec::new("Vulnerabilities", values).with_colors([
        palette.danger,
        palette.warning,
        palette.info,
        palette.success,
    ]);

    ChartSpec::new(ChartKind::Pie)
        .with_labels(SEVERITY_LABELS)
        .with_series(series)
}
