//! Page-load chart wiring.
//!
//! Each of the four anchors is handled on its own: a missing anchor is
//! skipped, a bad attribute turns into a render error for that chart only.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::charts::{
    ChartSpec, ComplianceBreakdown, ComplianceCounts, SeverityCounts, TrendSeries,
    compliance_status_spec, security_score_chart, threat_trend_spec, vulnerability_severity_spec,
};
use crate::core::{AnchorAttributes, Palette};
use crate::dom::{Anchor, ChartBackend, ChartHandle, Document, Overlay};
use crate::error::DashboardResult;

pub const SECURITY_SCORE_ANCHOR: &str = "securityScoreChart";
pub const THREAT_TREND_ANCHOR: &str = "threatTrendChart";
pub const VULN_SEVERITY_ANCHOR: &str = "vulnSeverityChart";
pub const COMPLIANCE_STATUS_ANCHOR: &str = "complianceStatusChart";

/// Fixed mount points, in initialization order.
pub const DASHBOARD_ANCHORS: [&str; 4] = [
    SECURITY_SCORE_ANCHOR,
    THREAT_TREND_ANCHOR,
    VULN_SEVERITY_ANCHOR,
    COMPLIANCE_STATUS_ANCHOR,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartOutcome {
    Mounted(ChartHandle),
    /// Anchor not present on this page.
    Skipped,
    /// Anchor present but its data or the backend failed.
    RenderError(String),
}

impl ChartOutcome {
    #[must_use]
    pub fn handle(&self) -> Option<ChartHandle> {
        match self {
            Self::Mounted(handle) => Some(*handle),
            Self::Skipped | Self::RenderError(_) => None,
        }
    }

    #[must_use]
    pub fn is_render_error(&self) -> bool {
        matches!(self, Self::RenderError(_))
    }
}

/// Result of one initialization pass, one entry per anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReport {
    pub outcomes: Vec<(String, ChartOutcome)>,
}

impl InitReport {
    #[must_use]
    pub fn outcome(&self, anchor_id: &str) -> Option<&ChartOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == anchor_id)
            .map(|(_, outcome)| outcome)
    }

    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, ChartOutcome::Mounted(_)))
            .count()
    }
}

/// Spec plus the optional overlay drawn over its anchor.
type BuiltChart = (ChartSpec, Option<Overlay>);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartInitializer {
    palette: Palette,
}

impl ChartInitializer {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Builds and mounts every chart whose anchor exists.
    ///
    /// Calling this twice mounts a second, independent set of charts.
    pub fn initialize<D, B>(&self, document: &mut D, backend: &mut B) -> InitReport
    where
        D: Document + ?Sized,
        B: ChartBackend + ?Sized,
    {
        let outcomes = DASHBOARD_ANCHORS
            .iter()
            .map(|&anchor_id| {
                let outcome = self.initialize_anchor(anchor_id, document, backend);
                (anchor_id.to_owned(), outcome)
            })
            .collect();
        InitReport { outcomes }
    }

    fn initialize_anchor<D, B>(
        &self,
        anchor_id: &str,
        document: &mut D,
        backend: &mut B,
    ) -> ChartOutcome
    where
        D: Document + ?Sized,
        B: ChartBackend + ?Sized,
    {
        let Some(anchor) = document.anchor(anchor_id) else {
            debug!(anchor_id, "chart anchor not on page; skipping");
            return ChartOutcome::Skipped;
        };

        let built = match anchor_id {
            SECURITY_SCORE_ANCHOR => self.security_score(anchor),
            THREAT_TREND_ANCHOR => self.threat_trend(anchor),
            VULN_SEVERITY_ANCHOR => self.vulnerability_severity(anchor),
            _ => self.compliance_status(anchor),
        };

        let mounted = built.and_then(|(spec, overlay)| {
            let config = spec.to_config()?;
            let handle = backend.mount(anchor_id, &config)?;
            Ok((handle, overlay))
        });

        match mounted {
            Ok((handle, overlay)) => {
                debug!(anchor_id, handle = handle.0, "chart mounted");
                // Outcome stays Mounted: the backend already holds the chart.
                if let Some(overlay) = overlay {
                    if let Err(err) = document.append_overlay(anchor_id, overlay) {
                        warn!(anchor_id, error = %err, "chart overlay not attached");
                    }
                }
                ChartOutcome::Mounted(handle)
            }
            Err(err) => {
                warn!(anchor_id, error = %err, "chart not rendered");
                ChartOutcome::RenderError(err.to_string())
            }
        }
    }

    fn security_score(&self, anchor: &dyn Anchor) -> DashboardResult<BuiltChart> {
        let score = AnchorAttributes::new(anchor).int("data-score")?;
        let gauge = security_score_chart(score, &self.palette)?;
        Ok((gauge.spec, Some(gauge.overlay.to_overlay())))
    }

    fn threat_trend(&self, anchor: &dyn Anchor) -> DashboardResult<BuiltChart> {
        let attributes = AnchorAttributes::new(anchor);
        let dates: Vec<String> = attributes.json_array("data-dates")?;
        let counts: Vec<u32> = attributes.json_array("data-counts")?;
        let trend = TrendSeries::new(dates, counts)?;
        Ok((threat_trend_spec(&trend, &self.palette)?, None))
    }

    fn vulnerability_severity(&self, anchor: &dyn Anchor) -> DashboardResult<BuiltChart> {
        let attributes = AnchorAttributes::new(anchor);
        let counts = SeverityCounts::new(
            attributes.count("data-critical")?,
            attributes.count("data-high")?,
            attributes.count("data-medium")?,
            attributes.count("data-low")?,
        );
        Ok((vulnerability_severity_spec(counts, &self.palette), None))
    }

    fn compliance_status(&self, anchor: &dyn Anchor) -> DashboardResult<BuiltChart> {
        let attributes = AnchorAttributes::new(anchor);
        let aggregate = ComplianceCounts::new(
            attributes.count("data-compliant")?,
            attributes.count("data-partially-compliant")?,
            attributes.count("data-non-compliant")?,
        );
        let breakdown = ComplianceBreakdown::placeholder(aggregate);
        Ok((compliance_status_spec(&breakdown, &self.palette)?, None))
    }
}
