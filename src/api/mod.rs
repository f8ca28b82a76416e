//! Async client for the backend's stats and phishing endpoints.

mod client;
mod phishing;
mod stats;

pub use client::{
    COMPLIANCE_STATS_PATH, DashboardApi, PHISHING_SIMULATE_PATH, THREAT_STATS_PATH,
    VULNERABILITY_STATS_PATH,
};
pub use phishing::{
    CSRF_HEADER, PHISHING_CREATED_MESSAGE, PHISHING_FAILED_MESSAGE, PhishingOutcome,
    PhishingResponse, PhishingSimulationForm, csrf_token, submit_phishing_simulation,
};
pub use stats::{
    ComplianceStats, DashboardSnapshot, FrameworkStats, ThreatStats, ThreatStatusCounts,
    VulnerabilityStats, VulnerabilityStatusCounts,
};
