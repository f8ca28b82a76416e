use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::charts::{ChartKind, ChartSpec, DataProvenance, SeriesSpec};
use crate::core::Palette;
use crate::error::{DashboardError, DashboardResult};

/// Control counts for one compliance framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCounts {
    pub compliant: u32,
    pub partially_compliant: u32,
    pub non_compliant: u32,
}

impl ComplianceCounts {
    #[must_use]
    pub fn new(compliant: u32, partially_compliant: u32, non_compliant: u32) -> Self {
        Self {
            compliant,
            partially_compliant,
            non_compliant,
        }
    }
}

/// Frameworks shown when only aggregate counts are available.
pub const PLACEHOLDER_FRAMEWORKS: [&str; 3] = ["GDPR", "PCI DSS", "ISO 27001"];

/// Per-framework deltas `(compliant, partial, non_compliant)` applied to the
/// aggregate in placeholder mode.
const PLACEHOLDER_OFFSETS: [(i64, i64, i64); 3] = [(0, 0, 0), (-2, 2, 1), (-5, 1, 3)];

/// Compliance counts in display order, one row per framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceBreakdown {
    pub frameworks: Vec<(String, ComplianceCounts)>,
    pub provenance: DataProvenance,
}

impl ComplianceBreakdown {
    /// Real per-framework counts.
    pub fn from_frameworks<I, S>(frameworks: I) -> Self
    where
        I: IntoIterator<Item = (S, ComplianceCounts)>,
        S: Into<String>,
    {
        Self {
            frameworks: frameworks
                .into_iter()
                .map(|(name, counts)| (name.into(), counts))
                .collect(),
            provenance: DataProvenance::Measured,
        }
    }

    /// Spreads one aggregate over three frameworks using fixed offsets.
    ///
    /// The result is display filler, not a per-framework measurement, and is
    /// tagged `DataProvenance::Placeholder`. Counts saturate at zero.
    #[must_use]
    pub fn placeholder(aggregate: ComplianceCounts) -> Self {
        let frameworks = PLACEHOLDER_FRAMEWORKS
            .iter()
            .zip(PLACEHOLDER_OFFSETS)
            .map(|(name, (compliant, partial, non_compliant))| {
                (
                    (*name).to_owned(),
                    ComplianceCounts {
                        compliant: offset(aggregate.compliant, compliant),
                        partially_compliant: offset(aggregate.partially_compliant, partial),
                        non_compliant: offset(aggregate.non_compliant, non_compliant),
                    },
                )
            })
            .collect();
        Self {
            frameworks,
            provenance: DataProvenance::Placeholder,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

fn offset(base: u32, delta: i64) -> u32 {
    let shifted = (i64::from(base) + delta).clamp(0, i64::from(u32::MAX));
    // Clamped to the u32 range.
    shifted as u32
}

/// Stacked bars: Compliant, Partially Compliant, Non-Compliant per framework.
pub fn compliance_status_spec(
    breakdown: &ComplianceBreakdown,
    palette: &Palette,
) -> DashboardResult<ChartSpec> {
    if breakdown.is_empty() {
        return Err(DashboardError::InvalidData(
            "compliance chart needs at least one framework".to_owned(),
        ));
    }
    if breakdown.provenance == DataProvenance::Placeholder {
        warn!(
            frameworks = breakdown.frameworks.len(),
            "compliance chart built from placeholder offsets"
        );
    }

    let column = |pick: fn(&ComplianceCounts) -> u32| -> Vec<f64> {
        breakdown
            .frameworks
            .iter()
            .map(|(_, counts)| f64::from(pick(counts)))
            .collect()
    };

    Ok(ChartSpec::new(ChartKind::StackedBar)
        .with_labels(breakdown.frameworks.iter().map(|(name, _)| name.clone()))
        .with_series(
            SeriesSpec::new("Compliant", column(|c| c.compliant)).with_color(palette.success),
        )
        .with_series(
            SeriesSpec::new("Partially Compliant", column(|c| c.partially_compliant))
                .with_color(palette.warning),
        )
        .with_series(
            SeriesSpec::new("Non-Compliant", column(|c| c.non_compliant))
                .with_color(palette.danger),
        )
        .with_provenance(breakdown.provenance))
}

#[cfg(test)]
mod tests {
    use super::{ComplianceBreakdown, ComplianceCounts};
    use crate::charts::DataProvenance;

    #[test]
    fn placeholder_applies_fixed_offsets() {
        let breakdown = ComplianceBreakdown::placeholder(ComplianceCounts::new(10, 4, 2));
        assert_eq!(breakdown.provenance, DataProvenance::Placeholder);
        let rows: Vec<_> = breakdown.frameworks.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            rows,
            vec![
                ComplianceCounts::new(10, 4, 2),
                ComplianceCounts::new(8, 6, 3),
                ComplianceCounts::new(5, 5, 5),
            ]
        );
    }

    #[test]
    fn placeholder_saturates_at_zero() {
        let breakdown = ComplianceBreakdown::placeholder(ComplianceCounts::new(1, 0, 0));
        assert_eq!(breakdown.frameworks[1].1.compliant, 0);
        assert_eq!(breakdown.frameworks[2].1.compliant, 0);
    }
}
