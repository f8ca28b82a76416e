use cybershield_dashboard::charts::{ChartConfig, ChartKind};
use cybershield_dashboard::core::Palette;
use cybershield_dashboard::dom::{
    Anchor, ChartBackend, ChartHandle, Document, Overlay, RecordingBackend, StaticDocument,
    StaticElement,
};
use cybershield_dashboard::initializer::{
    COMPLIANCE_STATUS_ANCHOR, DASHBOARD_ANCHORS, SECURITY_SCORE_ANCHOR, THREAT_TREND_ANCHOR,
    VULN_SEVERITY_ANCHOR,
};
use cybershield_dashboard::{ChartInitializer, ChartOutcome, DashboardError, DashboardResult};

fn full_dashboard() -> StaticDocument {
    StaticDocument::new()
        .with_element(StaticElement::new(SECURITY_SCORE_ANCHOR).with_attribute("data-score", "83"))
        .with_element(
            StaticElement::new(THREAT_TREND_ANCHOR)
                .with_attribute("data-dates", r#"["2024-06-01","2024-06-02","2024-06-03"]"#)
                .with_attribute("data-counts", "[2, 0, 5]"),
        )
        .with_element(
            StaticElement::new(VULN_SEVERITY_ANCHOR)
                .with_attribute("data-critical", "1")
                .with_attribute("data-high", "4")
                .with_attribute("data-medium", "9")
                .with_attribute("data-low", "12"),
        )
        .with_element(
            StaticElement::new(COMPLIANCE_STATUS_ANCHOR)
                .with_attribute("data-compliant", "30")
                .with_attribute("data-non-compliant", "4")
                .with_attribute("data-partially-compliant", "6"),
        )
}

#[test]
fn all_four_charts_mount_on_a_full_page() {
    let mut document = full_dashboard();
    let mut backend = RecordingBackend::new();
    let report = ChartInitializer::default().initialize(&mut document, &mut backend);

    assert_eq!(report.mounted_count(), 4);
    let anchors: Vec<&str> = report.outcomes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(anchors, DASHBOARD_ANCHORS.to_vec());

    let kinds: Vec<ChartKind> = backend.mounted().iter().map(|m| m.config.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChartKind::Gauge,
            ChartKind::Line,
            ChartKind::Pie,
            ChartKind::StackedBar
        ]
    );

    let gauge = &backend.mounted()[0].config.data.datasets[0];
    assert_eq!(gauge.data, vec![83.0, 17.0]);

    let compliance = &backend.mounted()[3].config;
    assert_eq!(compliance.data.datasets[0].data, vec![30.0, 28.0, 25.0]);
    assert_eq!(compliance.data.datasets[1].data, vec![6.0, 8.0, 7.0]);
    assert_eq!(compliance.data.datasets[2].data, vec![4.0, 5.0, 7.0]);
}

#[test]
fn gauge_adds_centered_score_overlay() {
    let mut document = full_dashboard();
    let mut backend = RecordingBackend::new();
    ChartInitializer::default().initialize(&mut document, &mut backend);

    let anchor = document.element(SECURITY_SCORE_ANCHOR).expect("anchor");
    assert!(anchor.parent_positioned());
    assert_eq!(anchor.overlays().len(), 1);
    let overlay = &anchor.overlays()[0];
    assert_eq!(
        overlay.classes,
        vec!["position-absolute", "top-50", "start-50", "translate-middle", "text-center"]
    );
    assert_eq!(overlay.inner_html, "<h3 class=\"mb-0\">83</h3><small>Score</small>");
}

#[test]
fn missing_anchors_are_skipped_without_blocking_others() {
    let mut document = StaticDocument::new().with_element(
        StaticElement::new(VULN_SEVERITY_ANCHOR)
            .with_attribute("data-critical", "0")
            .with_attribute("data-high", "0")
            .with_attribute("data-medium", "1")
            .with_attribute("data-low", "0"),
    );
    let mut backend = RecordingBackend::new();
    let report = ChartInitializer::default().initialize(&mut document, &mut backend);

    assert_eq!(report.outcome(SECURITY_SCORE_ANCHOR), Some(&ChartOutcome::Skipped));
    assert_eq!(report.outcome(THREAT_TREND_ANCHOR), Some(&ChartOutcome::Skipped));
    assert_eq!(report.outcome(COMPLIANCE_STATUS_ANCHOR), Some(&ChartOutcome::Skipped));
    assert!(matches!(
        report.outcome(VULN_SEVERITY_ANCHOR),
        Some(ChartOutcome::Mounted(_))
    ));
    assert_eq!(backend.mounted().len(), 1);
}

#[test]
fn empty_page_initializes_nothing() {
    let mut document = StaticDocument::new();
    let mut backend = RecordingBackend::new();
    let report = ChartInitializer::default().initialize(&mut document, &mut backend);
    assert_eq!(report.mounted_count(), 0);
    assert!(
        report
            .outcomes
            .iter()
            .all(|(_, outcome)| *outcome == ChartOutcome::Skipped)
    );
}

#[test]
fn malformed_attributes_become_render_errors() {
    let mut document = full_dashboard();
    document.insert(StaticElement::new(SECURITY_SCORE_ANCHOR).with_attribute("data-score", "high"));
    document.insert(
        StaticElement::new(THREAT_TREND_ANCHOR)
            .with_attribute("data-dates", r#"["2024-06-01"]"#)
            .with_attribute("data-counts", "[1, 2]"),
    );
    document.insert(
        StaticElement::new(VULN_SEVERITY_ANCHOR)
            .with_attribute("data-critical", "1")
            .with_attribute("data-high", "2")
            .with_attribute("data-medium", "3"),
    );

    let mut backend = RecordingBackend::new();
    let report = ChartInitializer::default().initialize(&mut document, &mut backend);

    for anchor in [SECURITY_SCORE_ANCHOR, THREAT_TREND_ANCHOR, VULN_SEVERITY_ANCHOR] {
        let outcome = report.outcome(anchor).expect("outcome");
        assert!(outcome.is_render_error(), "{anchor}: {outcome:?}");
    }
    match report.outcome(VULN_SEVERITY_ANCHOR) {
        Some(ChartOutcome::RenderError(reason)) => assert!(reason.contains("data-low")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(matches!(
        report.outcome(COMPLIANCE_STATUS_ANCHOR),
        Some(ChartOutcome::Mounted(_))
    ));
    assert_eq!(backend.mounted().len(), 1);
    assert!(
        document
            .element(SECURITY_SCORE_ANCHOR)
            .expect("anchor")
            .overlays()
            .is_empty()
    );
}

#[test]
fn out_of_range_score_is_a_render_error() {
    let mut document = StaticDocument::new()
        .with_element(StaticElement::new(SECURITY_SCORE_ANCHOR).with_attribute("data-score", "140"));
    let mut backend = RecordingBackend::new();
    let report = ChartInitializer::default().initialize(&mut document, &mut backend);
    assert!(
        report
            .outcome(SECURITY_SCORE_ANCHOR)
            .expect("outcome")
            .is_render_error()
    );
}

#[test]
fn initializing_twice_mounts_independent_instances() {
    let mut document = full_dashboard();
    let mut backend = RecordingBackend::new();
    let initializer = ChartInitializer::new(Palette::default());

    let first = initializer.initialize(&mut document, &mut backend);
    let second = initializer.initialize(&mut document, &mut backend);

    assert_eq!(backend.mounted().len(), 8);
    assert_eq!(backend.mounted_on(THREAT_TREND_ANCHOR).count(), 2);
    let first_handle = first.outcome(THREAT_TREND_ANCHOR).and_then(ChartOutcome::handle);
    let second_handle = second.outcome(THREAT_TREND_ANCHOR).and_then(ChartOutcome::handle);
    assert!(first_handle.is_some());
    assert_ne!(first_handle, second_handle);
}

struct FailingBackend;

impl ChartBackend for FailingBackend {
    fn mount(&mut self, anchor_id: &str, _config: &ChartConfig) -> DashboardResult<ChartHandle> {
        Err(DashboardError::InvalidData(format!("no canvas for {anchor_id}")))
    }
}

#[test]
fn backend_failure_is_reported_per_chart() {
    let mut document = full_dashboard();
    let report = ChartInitializer::default().initialize(&mut document, &mut FailingBackend);
    assert_eq!(report.mounted_count(), 0);
    assert!(report.outcomes.iter().all(|(_, outcome)| outcome.is_render_error()));
    assert!(
        document
            .element(SECURITY_SCORE_ANCHOR)
            .expect("anchor")
            .overlays()
            .is_empty()
    );
}

/// Page whose anchors can be read but which refuses overlays.
struct SealedDocument(StaticDocument);

impl Document for SealedDocument {
    fn anchor(&self, id: &str) -> Option<&dyn Anchor> {
        self.0.anchor(id)
    }

    fn append_overlay(&mut self, anchor_id: &str, _overlay: Overlay) -> DashboardResult<()> {
        Err(DashboardError::InvalidData(format!("parent of {anchor_id} is sealed")))
    }

    fn meta_content(&self, name: &str) -> Option<&str> {
        self.0.meta_content(name)
    }
}

#[test]
fn overlay_failure_keeps_mounted_chart_in_report() {
    let mut document = SealedDocument(full_dashboard());
    let mut backend = RecordingBackend::new();
    let report = ChartInitializer::default().initialize(&mut document, &mut backend);

    let gauge = report.outcome(SECURITY_SCORE_ANCHOR).and_then(ChartOutcome::handle);
    let mounted: Vec<ChartHandle> = backend
        .mounted_on(SECURITY_SCORE_ANCHOR)
        .map(|chart| chart.handle)
        .collect();
    assert_eq!(mounted.len(), 1);
    assert_eq!(gauge, Some(mounted[0]));
    assert_eq!(report.mounted_count(), backend.mounted().len());
}
