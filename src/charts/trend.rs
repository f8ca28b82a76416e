use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::charts::{ChartKind, ChartSpec, SeriesSpec};
use crate::core::Palette;
use crate::error::{DashboardError, DashboardResult};

pub const TREND_SERIES_NAME: &str = "Security Events";

/// Daily event counts with one label per count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub dates: Vec<String>,
    pub counts: Vec<u32>,
}

impl TrendSeries {
    pub fn new(dates: Vec<String>, counts: Vec<u32>) -> DashboardResult<Self> {
        if dates.len() != counts.len() {
            return Err(DashboardError::InvalidData(format!(
                "trend has {} dates but {} counts",
                dates.len(),
                counts.len()
            )));
        }
        Ok(Self { dates, counts })
    }

    /// Builds a trend from a `YYYY-MM-DD -> count` map, ordered by date.
    pub fn from_daily(daily: &BTreeMap<String, u32>) -> DashboardResult<Self> {
        let mut days = Vec::with_capacity(daily.len());
        for (label, count) in daily {
            let date = NaiveDate::parse_from_str(label, "%Y-%m-%d").map_err(|e| {
                DashboardError::InvalidData(format!("trend date `{label}` is not YYYY-MM-DD: {e}"))
            })?;
            days.push((date, label.clone(), *count));
        }
        days.sort_by_key(|(date, _, _)| *date);

        let (dates, counts) = days
            .into_iter()
            .map(|(_, label, count)| (label, count))
            .unzip();
        Ok(Self { dates, counts })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }
}

/// Single filled line over the trend dates.
pub fn threat_trend_spec(trend: &TrendSeries, palette: &Palette) -> DashboardResult<ChartSpec> {
    if trend.dates.len() != trend.counts.len() {
        return Err(DashboardError::InvalidData(format!(
            "trend has {} dates but {} counts",
            trend.dates.len(),
            trend.counts.len()
        )));
    }
    let values = trend.counts.iter().map(|&count| f64::from(count)).collect();
    let series = SeriesSpec::new(TREND_SERIES_NAME, values).with_colors([palette.info, palette.trend_fill]);

    Ok(ChartSpec::new(ChartKind::Line)
        .with_labels(trend.dates.iter().cloned())
        .with_series(series))
}
