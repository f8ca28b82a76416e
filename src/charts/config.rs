use serde::{Deserialize, Serialize};

use crate::charts::{ChartKind, ChartSpec, SeriesSpec};
use crate::core::Color;
use crate::error::{DashboardError, DashboardResult};

/// Payload handed to the charting library: `{type, data, options}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaintSpec {
    Single(Color),
    PerItem(Vec<Color>),
}

impl PaintSpec {
    fn colors(&self) -> &[Color] {
        match self {
            Self::Single(color) => std::slice::from_ref(color),
            Self::PerItem(colors) => colors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: PaintSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    fn new(data: Vec<f64>, background_color: PaintSpec) -> Self {
        Self {
            label: None,
            data,
            background_color,
            border_color: None,
            border_width: None,
            tension: None,
            fill: None,
        }
    }
}

/// `{enabled}` / `{display}` switches used by tooltip, legend and grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Toggle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

impl Toggle {
    #[must_use]
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            display: None,
        }
    }

    #[must_use]
    pub fn display(display: bool) -> Self {
        Self {
            enabled: None,
            display: Some(display),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Toggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Toggle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOptions {
    pub precision: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Toggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticks: Option<TickOptions>,
}

impl AxisOptions {
    /// Value axis starting at zero with whole-number ticks.
    fn integer_counts() -> Self {
        Self {
            begin_at_zero: Some(true),
            ticks: Some(TickOptions { precision: 0 }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScaleOptions {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<ScaleOptions>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            cutout: None,
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: None,
            scales: None,
        }
    }
}

/// Share of the gauge radius left hollow.
pub const GAUGE_CUTOUT: &str = "75%";
/// Bezier tension of the trend line.
pub const TREND_LINE_TENSION: f64 = 0.4;

impl ChartSpec {
    /// Builds the library payload for this spec.
    pub fn to_config(&self) -> DashboardResult<ChartConfig> {
        self.validate()?;
        let labels = (!self.labels.is_empty()).then(|| self.labels.clone());

        let (datasets, options) = match self.kind {
            ChartKind::Gauge => {
                let series = self.single_series()?;
                let mut dataset = Dataset::new(
                    series.values.clone(),
                    PaintSpec::PerItem(per_item_colors(series)?),
                );
                dataset.border_width = Some(0);
                let options = ChartOptions {
                    cutout: Some(GAUGE_CUTOUT.to_owned()),
                    plugins: Some(PluginOptions {
                        tooltip: Some(Toggle::enabled(false)),
                        legend: Some(Toggle::display(false)),
                    }),
                    ..ChartOptions::default()
                };
                (vec![dataset], options)
            }
            ChartKind::Line => {
                let series = self.single_series()?;
                let border = color_at(series, 0)?;
                let fill = color_at(series, 1)?;
                let mut dataset = Dataset::new(series.values.clone(), PaintSpec::Single(fill));
                dataset.label = Some(series.name.clone());
                dataset.border_color = Some(border);
                dataset.tension = Some(TREND_LINE_TENSION);
                dataset.fill = Some(true);
                let options = ChartOptions {
                    plugins: Some(PluginOptions {
                        tooltip: None,
                        legend: Some(Toggle::display(false)),
                    }),
                    scales: Some(ScaleOptions {
                        x: AxisOptions {
                            grid: Some(Toggle::display(false)),
                            ..AxisOptions::default()
                        },
                        y: AxisOptions::integer_counts(),
                    }),
                    ..ChartOptions::default()
                };
                (vec![dataset], options)
            }
            ChartKind::Pie => {
                let series = self.single_series()?;
                let mut dataset = Dataset::new(
                    series.values.clone(),
                    PaintSpec::PerItem(per_item_colors(series)?),
                );
                dataset.border_width = Some(0);
                (vec![dataset], ChartOptions::default())
            }
            ChartKind::StackedBar => {
                let mut datasets = Vec::with_capacity(self.series.len());
                for series in &self.series {
                    let mut dataset =
                        Dataset::new(series.values.clone(), PaintSpec::Single(color_at(series, 0)?));
                    dataset.label = Some(series.name.clone());
                    datasets.push(dataset);
                }
                let options = ChartOptions {
                    scales: Some(ScaleOptions {
                        x: AxisOptions {
                            stacked: Some(true),
                            ..AxisOptions::default()
                        },
                        y: AxisOptions {
                            stacked: Some(true),
                            ..AxisOptions::integer_counts()
                        },
                    }),
                    ..ChartOptions::default()
                };
                (datasets, options)
            }
        };

        Ok(ChartConfig {
            kind: self.kind,
            data: ChartData { labels, datasets },
            options,
        })
    }

    fn single_series(&self) -> DashboardResult<&SeriesSpec> {
        match self.series.as_slice() {
            [series] => Ok(series),
            other => Err(DashboardError::InvalidData(format!(
                "{:?} chart expects exactly one series, got {}",
                self.kind,
                other.len()
            ))),
        }
    }
}

fn color_at(series: &SeriesSpec, index: usize) -> DashboardResult<Color> {
    series.colors.get(index).copied().ok_or_else(|| {
        DashboardError::InvalidData(format!(
            "series `{}` is missing color #{index}",
            series.name
        ))
    })
}

fn per_item_colors(series: &SeriesSpec) -> DashboardResult<Vec<Color>> {
    if series.colors.len() != series.values.len() {
        return Err(DashboardError::InvalidData(format!(
            "series `{}` needs one color per value ({} colors, {} values)",
            series.name,
            series.colors.len(),
            series.values.len()
        )));
    }
    Ok(series.colors.to_vec())
}

impl ChartConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        if self.data.datasets.is_empty() {
            return Err(DashboardError::InvalidData(
                "chart config has no datasets".to_owned(),
            ));
        }
        for dataset in &self.data.datasets {
            if dataset.data.iter().any(|value| !value.is_finite()) {
                return Err(DashboardError::InvalidData(
                    "dataset values must be finite".to_owned(),
                ));
            }
            if let Some(labels) = &self.data.labels {
                if labels.len() != dataset.data.len() {
                    return Err(DashboardError::InvalidData(format!(
                        "dataset has {} values for {} labels",
                        dataset.data.len(),
                        labels.len()
                    )));
                }
            }
            for color in dataset.background_color.colors() {
                color.validate()?;
            }
            if let Some(border) = dataset.border_color {
                border.validate()?;
            }
        }
        Ok(())
    }

    pub fn to_json_value(&self) -> DashboardResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}
