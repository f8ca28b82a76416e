use serde::{Deserialize, Serialize};

use crate::charts::{ChartKind, ChartSpec, SeriesSpec};
use crate::core::{Palette, score_color};
use crate::dom::Overlay;
use crate::error::{DashboardError, DashboardResult};

/// Upper bound of the gauge ring.
pub const GAUGE_MAX: i64 = 100;

/// Centered label drawn over the gauge ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOverlay {
    pub score: u8,
}

impl ScoreOverlay {
    pub const CLASSES: [&'static str; 5] = [
        "position-absolute",
        "top-50",
        "start-50",
        "translate-middle",
        "text-center",
    ];

    #[must_use]
    pub fn inner_html(&self) -> String {
        format!(
            "<h3 class=\"mb-0\">{}</h3><small>Score</small>",
            self.score
        )
    }

    #[must_use]
    pub fn to_overlay(&self) -> Overlay {
        Overlay {
            classes: Self::CLASSES.iter().map(|class| (*class).to_owned()).collect(),
            inner_html: self.inner_html(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeChart {
    pub spec: ChartSpec,
    pub overlay: ScoreOverlay,
}

/// Two-segment ring `[score, 100 - score]` colored by score tier.
///
/// Scores outside `0..=100` are rejected; the remainder segment would be
/// negative.
pub fn security_score_chart(score: i64, palette: &Palette) -> DashboardResult<GaugeChart> {
    if !(0..=GAUGE_MAX).contains(&score) {
        return Err(DashboardError::InvalidData(format!(
            "security score must be in 0..={GAUGE_MAX}, got {score}"
        )));
    }
    // Range-checked above.
    let value = score as u8;

    let remainder = GAUGE_MAX - score;
    let series = SeriesSpec::new("Security Score", vec![score as f64, remainder as f64])
        .with_colors([score_color(score, palette), palette.neutral]);

    Ok(GaugeChart {
        spec: ChartSpec::new(ChartKind::Gauge).with_series(series),
        overlay: ScoreOverlay { score: value },
    })
}
