use reqwest::header::ACCEPT;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{ComplianceStats, DashboardSnapshot, ThreatStats, VulnerabilityStats};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};

pub const THREAT_STATS_PATH: &str = "/threats/api/stats";
pub const VULNERABILITY_STATS_PATH: &str = "/vulnerabilities/api/stats";
pub const COMPLIANCE_STATS_PATH: &str = "/compliance/api/stats";
pub const PHISHING_SIMULATE_PATH: &str = "/phishing/simulate";

/// Thin async client for the dashboard's JSON endpoints.
///
/// No retries and no backoff: each call is one request and one typed result.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: Client,
    base_url: Url,
}

impl DashboardApi {
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|source| DashboardError::Transport {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    /// Uses a caller-supplied client, e.g. one sharing a cookie store with
    /// the logged-in session.
    #[must_use]
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn endpoint(&self, path: &str) -> DashboardResult<Url> {
        self.base_url.join(path).map_err(|e| {
            DashboardError::InvalidConfig(format!("cannot join `{path}` onto base url: {e}"))
        })
    }

    pub async fn threat_stats(&self) -> DashboardResult<ThreatStats> {
        self.get_json(THREAT_STATS_PATH).await
    }

    pub async fn vulnerability_stats(&self) -> DashboardResult<VulnerabilityStats> {
        self.get_json(VULNERABILITY_STATS_PATH).await
    }

    pub async fn compliance_stats(&self) -> DashboardResult<ComplianceStats> {
        self.get_json(COMPLIANCE_STATS_PATH).await
    }

    /// Requests all three stats bodies concurrently.
    ///
    /// Each part fails on its own: an error is logged and that part is left
    /// empty, the others are still returned.
    pub async fn fetch_dashboard_data(&self) -> DashboardSnapshot {
        let (threats, vulnerabilities, compliance) = tokio::join!(
            self.threat_stats(),
            self.vulnerability_stats(),
            self.compliance_stats()
        );
        DashboardSnapshot {
            threats: log_failure("threat", threats),
            vulnerabilities: log_failure("vulnerability", vulnerabilities),
            compliance: log_failure("compliance", compliance),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DashboardResult<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "fetch stats");
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| DashboardError::Transport {
                url: url.to_string(),
                source,
            })?;
        decode_json(&url, response).await
    }
}

/// Checks the status, then decodes the body as `T`.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    url: &Url,
    response: Response,
) -> DashboardResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|source| DashboardError::Transport {
            url: url.to_string(),
            source,
        })?;
    serde_json::from_slice(&body).map_err(|e| DashboardError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn log_failure<T>(what: &'static str, result: DashboardResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(stats = what, error = %err, "error fetching stats");
            None
        }
    }
}
