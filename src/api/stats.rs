use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::charts::{ComplianceBreakdown, ComplianceCounts, SeverityCounts, TrendSeries};
use crate::error::DashboardResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatStatusCounts {
    pub active: u32,
    pub contained: u32,
    pub resolved: u32,
    pub false_positive: u32,
}

/// Body of `GET /threats/api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatStats {
    pub severity: SeverityCounts,
    pub status: ThreatStatusCounts,
    #[serde(rename = "type")]
    pub by_type: IndexMap<String, u32>,
    pub source: IndexMap<String, u32>,
    /// `YYYY-MM-DD -> count` over the last 30 days.
    pub daily: BTreeMap<String, u32>,
}

impl ThreatStats {
    pub fn trend(&self) -> DashboardResult<TrendSeries> {
        TrendSeries::from_daily(&self.daily)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityStatusCounts {
    pub open: u32,
    pub in_progress: u32,
    pub fixed: u32,
    pub accepted_risk: u32,
    pub false_positive: u32,
}

/// Body of `GET /vulnerabilities/api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityStats {
    pub severity: SeverityCounts,
    pub status: VulnerabilityStatusCounts,
    /// Top assets by finding count. The server serializes this object with
    /// sorted keys, so iteration order is by name; see [`Self::top_assets`].
    pub assets: IndexMap<String, u32>,
    pub daily: BTreeMap<String, u32>,
}

impl VulnerabilityStats {
    /// Assets ranked by finding count, highest first; ties by name.
    #[must_use]
    pub fn top_assets(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self
            .assets
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn trend(&self) -> DashboardResult<TrendSeries> {
        TrendSeries::from_daily(&self.daily)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkStats {
    pub total: u32,
    pub compliant: u32,
    pub non_compliant: u32,
    pub partially_compliant: u32,
    pub not_applicable: u32,
    /// Compliant share of applicable controls, rounded to a whole percent.
    pub percentage: u32,
}

impl FrameworkStats {
    #[must_use]
    pub fn applicable(&self) -> u32 {
        self.total.saturating_sub(self.not_applicable)
    }

    #[must_use]
    pub fn counts(&self) -> ComplianceCounts {
        ComplianceCounts::new(
            self.compliant,
            self.partially_compliant,
            self.non_compliant,
        )
    }
}

/// Body of `GET /compliance/api/stats`: framework name to its statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplianceStats {
    pub frameworks: IndexMap<String, FrameworkStats>,
}

impl ComplianceStats {
    /// Measured per-framework breakdown for the stacked bar chart.
    #[must_use]
    pub fn breakdown(&self) -> ComplianceBreakdown {
        ComplianceBreakdown::from_frameworks(
            self.frameworks
                .iter()
                .map(|(name, stats)| (name.clone(), stats.counts())),
        )
    }
}

/// Whatever the three stats endpoints returned; failed parts are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub threats: Option<ThreatStats>,
    pub vulnerabilities: Option<VulnerabilityStats>,
    pub compliance: Option<ComplianceStats>,
}

impl DashboardSnapshot {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.threats.is_some() && self.vulnerabilities.is_some() && self.compliance.is_some()
    }
}
