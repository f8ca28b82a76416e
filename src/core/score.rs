use serde::{Deserialize, Serialize};

use crate::core::{Color, Palette};

/// Display tier for a 0..=100 security score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    /// Threshold ladder: `>= 90`, `>= 70`, `>= 50`, everything else.
    ///
    /// Total over `i64`; out-of-range scores still land on the nearest end.
    #[must_use]
    pub fn for_score(score: i64) -> Self {
        if score >= 90 {
            Self::Excellent
        } else if score >= 70 {
            Self::Good
        } else if score >= 50 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Excellent => palette.success,
            Self::Good => palette.info,
            Self::Fair => palette.warning,
            Self::Poor => palette.danger,
        }
    }
}

#[must_use]
pub fn score_color(score: i64, palette: &Palette) -> Color {
    ScoreTier::for_score(score).color(palette)
}

/// Weighted organization score derived from open vulnerabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScore(u8);

impl SecurityScore {
    /// `100 - min(100, (10*critical + 5*high + 2*medium) / total_assets)`,
    /// rounded half to even (98.5 becomes 98). No assets means nothing is
    /// exposed.
    #[must_use]
    pub fn from_exposure(critical: u32, high: u32, medium: u32, total_assets: u32) -> Self {
        if total_assets == 0 {
            return Self(100);
        }
        let weighted =
            f64::from(critical) * 10.0 + f64::from(high) * 5.0 + f64::from(medium) * 2.0;
        let penalty = (weighted / f64::from(total_assets)).min(100.0);
        // Clamped to [0, 100] above, so the cast cannot truncate.
        Self((100.0 - penalty).round_ties_even() as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn tier(self) -> ScoreTier {
        ScoreTier::for_score(i64::from(self.0))
    }
}
