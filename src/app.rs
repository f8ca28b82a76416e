use tracing::{debug, warn};

use crate::api::{DashboardApi, DashboardSnapshot};
use crate::charts::{
    ChartSpec, compliance_status_spec, threat_trend_spec, vulnerability_severity_spec,
};
use crate::config::DashboardConfig;
use crate::dom::{ChartBackend, Document};
use crate::error::DashboardResult;
use crate::initializer::{
    COMPLIANCE_STATUS_ANCHOR, ChartInitializer, ChartOutcome, InitReport, THREAT_TREND_ANCHOR,
    VULN_SEVERITY_ANCHOR,
};
use crate::notify::NotificationDispatcher;

/// Services wired once at startup and shared by reference afterwards.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    initializer: ChartInitializer,
    notifications: NotificationDispatcher,
    api: DashboardApi,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let api = DashboardApi::new(&config)?;
        let notifications =
            NotificationDispatcher::new(config.toast_placement, config.toast_autohide());
        Ok(Self {
            initializer: ChartInitializer::new(config.palette),
            notifications,
            api,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn api(&self) -> &DashboardApi {
        &self.api
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationDispatcher {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationDispatcher {
        &mut self.notifications
    }

    /// Page-load pass: mounts every chart whose anchor is present.
    pub fn page_load<D, B>(&self, document: &mut D, backend: &mut B) -> InitReport
    where
        D: Document + ?Sized,
        B: ChartBackend + ?Sized,
    {
        let report = self.initializer.initialize(document, backend);
        debug!(mounted = report.mounted_count(), "dashboard page loaded");
        report
    }

    /// Mounts charts built from live stats onto the anchors that exist.
    ///
    /// Parts missing from the snapshot are skipped, like missing anchors.
    pub fn render_snapshot<D, B>(
        &self,
        snapshot: &DashboardSnapshot,
        document: &D,
        backend: &mut B,
    ) -> InitReport
    where
        D: Document + ?Sized,
        B: ChartBackend + ?Sized,
    {
        let palette = &self.config.palette;
        let candidates: [(&str, Option<DashboardResult<ChartSpec>>); 3] = [
            (
                THREAT_TREND_ANCHOR,
                snapshot.threats.as_ref().map(|threats| {
                    threats
                        .trend()
                        .and_then(|trend| threat_trend_spec(&trend, palette))
                }),
            ),
            (
                VULN_SEVERITY_ANCHOR,
                snapshot
                    .vulnerabilities
                    .as_ref()
                    .map(|vulns| Ok(vulnerability_severity_spec(vulns.severity, palette))),
            ),
            (
                COMPLIANCE_STATUS_ANCHOR,
                snapshot
                    .compliance
                    .as_ref()
                    .map(|compliance| compliance_status_spec(&compliance.breakdown(), palette)),
            ),
        ];

        let outcomes = candidates
            .into_iter()
            .map(|(anchor_id, spec)| {
                let outcome = match (document.anchor(anchor_id), spec) {
                    (Some(_), Some(spec)) => {
                        match spec
                            .and_then(|spec| spec.to_config())
                            .and_then(|config| backend.mount(anchor_id, &config))
                        {
                            Ok(handle) => ChartOutcome::Mounted(handle),
                            Err(err) => {
                                warn!(anchor_id, error = %err, "live chart not rendered");
                                ChartOutcome::RenderError(err.to_string())
                            }
                        }
                    }
                    _ => ChartOutcome::Skipped,
                };
                (anchor_id.to_owned(), outcome)
            })
            .collect();
        InitReport { outcomes }
    }
}
