use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::map_request;
use axum::routing::{MethodRouter, any, post};
use axum::{Json, Router};
use chrono::Duration;
use cybershield_dashboard::api::{
    COMPLIANCE_STATS_PATH, CSRF_HEADER, DashboardApi, PHISHING_CREATED_MESSAGE,
    PHISHING_FAILED_MESSAGE, PHISHING_SIMULATE_PATH, PhishingOutcome, PhishingSimulationForm,
    THREAT_STATS_PATH, VULNERABILITY_STATS_PATH, csrf_token, submit_phishing_simulation,
};
use cybershield_dashboard::dom::StaticDocument;
use cybershield_dashboard::notify::ToastPlacement;
use cybershield_dashboard::{DashboardConfig, DashboardError, NotificationDispatcher, Severity};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const THREAT_BODY: &str = r#"{
    "severity": {"critical": 2, "high": 5, "medium": 7, "low": 1},
    "status": {"active": 3, "contained": 4, "resolved": 8, "false_positive": 0},
    "type": {"phishing": 6, "malware": 9},
    "source": {"email": 6, "endpoint": 9},
    "daily": {"2024-06-02": 4, "2024-06-01": 11}
}"#;

const VULNERABILITY_BODY: &str = r#"{
    "severity": {"critical": 1, "high": 2, "medium": 3, "low": 4},
    "status": {"open": 5, "in_progress": 2, "fixed": 3, "accepted_risk": 0, "false_positive": 0},
    "assets": {"app-02": 4, "db-01": 4, "web-01": 6},
    "daily": {"2024-06-01": 2}
}"#;

const COMPLIANCE_BODY: &str = r#"{
    "ISO 27001": {"total": 20, "compliant": 12, "non_compliant": 3, "partially_compliant": 4, "not_applicable": 1, "percentage": 63},
    "GDPR": {"total": 10, "compliant": 9, "non_compliant": 0, "partially_compliant": 1, "not_applicable": 0, "percentage": 90}
}"#;

/// Form submission as the stats server received it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Submission {
    csrf_token: Option<String>,
    fields: Vec<(String, String)>,
}

#[derive(Clone)]
struct PhishingState {
    submissions: Arc<Mutex<Vec<Submission>>>,
    reply: Value,
}

async fn record_submission(
    State(state): State<PhishingState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Json<Value> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_owned();
        let value = field.text().await.expect("text field");
        fields.push((name, value));
    }
    let csrf_token = headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state
        .submissions
        .lock()
        .expect("lock")
        .push(Submission { csrf_token, fields });
    Json(state.reply)
}

fn canned(status: StatusCode, body: &'static str) -> MethodRouter {
    any(move || async move { (status, [(CONTENT_TYPE, "application/json")], body) })
}

fn json_ok(body: &'static str) -> MethodRouter {
    canned(StatusCode::OK, body)
}

fn phishing_route(reply: Value) -> (MethodRouter, Arc<Mutex<Vec<Submission>>>) {
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let state = PhishingState {
        submissions: submissions.clone(),
        reply,
    };
    (post(record_submission).with_state(state), submissions)
}

/// Stats server on an ephemeral local port.
struct StubServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    async fn start(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = router.layer(map_request(move |request: Request| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                request
            }
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        Self {
            base_url: format!("http://{addr}"),
            hits,
        }
    }

    fn api(&self) -> DashboardApi {
        DashboardApi::new(&DashboardConfig::new(self.base_url.clone())).expect("api")
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn dispatcher() -> NotificationDispatcher {
    NotificationDispatcher::new(ToastPlacement::BottomEnd, Duration::seconds(5))
}

#[tokio::test]
async fn stats_endpoints_decode_into_typed_payloads() {
    let server = StubServer::start(
        Router::new()
            .route(THREAT_STATS_PATH, json_ok(THREAT_BODY))
            .route(VULNERABILITY_STATS_PATH, json_ok(VULNERABILITY_BODY))
            .route(COMPLIANCE_STATS_PATH, json_ok(COMPLIANCE_BODY)),
    )
    .await;
    let api = server.api();

    let threats = api.threat_stats().await.expect("threat stats");
    assert_eq!(threats.severity.critical, 2);
    assert_eq!(threats.status.resolved, 8);
    assert_eq!(threats.by_type.get("malware"), Some(&9));
    let trend = threats.trend().expect("trend");
    assert_eq!(trend.dates, vec!["2024-06-01", "2024-06-02"]);
    assert_eq!(trend.counts, vec![11, 4]);

    let vulnerabilities = api.vulnerability_stats().await.expect("vulnerability stats");
    assert_eq!(vulnerabilities.severity.total(), 10);
    assert_eq!(
        vulnerabilities.top_assets(),
        vec![("web-01", 6), ("app-02", 4), ("db-01", 4)]
    );

    let compliance = api.compliance_stats().await.expect("compliance stats");
    let breakdown = compliance.breakdown();
    assert_eq!(breakdown.frameworks[0].0, "ISO 27001");
    assert_eq!(breakdown.frameworks[0].1.partially_compliant, 4);
    assert_eq!(compliance.frameworks["ISO 27001"].applicable(), 19);
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn dashboard_fetch_keeps_successful_parts() {
    let server = StubServer::start(
        Router::new()
            .route(THREAT_STATS_PATH, json_ok(THREAT_BODY))
            .route(VULNERABILITY_STATS_PATH, json_ok("{not json"))
            .route(
                COMPLIANCE_STATS_PATH,
                canned(StatusCode::INTERNAL_SERVER_ERROR, "{}"),
            ),
    )
    .await;

    let snapshot = server.api().fetch_dashboard_data().await;
    assert!(snapshot.threats.is_some());
    assert!(snapshot.vulnerabilities.is_none());
    assert!(snapshot.compliance.is_none());
    assert!(!snapshot.is_complete());
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn failures_are_typed() {
    let server = StubServer::start(
        Router::new()
            .route(VULNERABILITY_STATS_PATH, json_ok("[1, 2"))
            .route(COMPLIANCE_STATS_PATH, canned(StatusCode::FORBIDDEN, "{}")),
    )
    .await;
    let api = server.api();

    assert!(matches!(
        api.vulnerability_stats().await,
        Err(DashboardError::Decode { .. })
    ));
    assert!(matches!(
        api.compliance_stats().await,
        Err(DashboardError::HttpStatus { status: 403, .. })
    ));
    assert!(matches!(
        api.threat_stats().await,
        Err(DashboardError::HttpStatus { status: 404, .. })
    ));

    let closed = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = closed.local_addr().expect("addr");
    drop(closed);
    let offline = DashboardApi::new(&DashboardConfig::new(format!("http://{addr}"))).expect("api");
    assert!(matches!(
        offline.threat_stats().await,
        Err(DashboardError::Transport { .. })
    ));
}

#[tokio::test]
async fn phishing_submission_sends_csrf_header_and_multipart_form() {
    let (route, submissions) = phishing_route(json!({"success": true}));
    let server = StubServer::start(Router::new().route(PHISHING_SIMULATE_PATH, route)).await;
    let api = server.api();
    let document = StaticDocument::new().with_meta("csrf-token", "tok-123");
    let token = csrf_token(&document, "csrf-token").expect("token");
    let form = PhishingSimulationForm::new()
        .with_field("name", "Q3 finance drill")
        .with_field("template", "invoice");

    let mut dispatcher = dispatcher();
    let (toast, result) = submit_phishing_simulation(&api, &mut dispatcher, &form, &token).await;
    assert_eq!(result.expect("outcome"), PhishingOutcome::Created);

    let shown = dispatcher.container().get(toast).expect("toast");
    assert_eq!(shown.message, PHISHING_CREATED_MESSAGE);
    assert_eq!(shown.severity, Severity::Success);

    let received = submissions.lock().expect("lock").clone();
    assert_eq!(
        received,
        vec![Submission {
            csrf_token: Some("tok-123".to_owned()),
            fields: vec![
                ("name".to_owned(), "Q3 finance drill".to_owned()),
                ("template".to_owned(), "invoice".to_owned()),
            ],
        }]
    );
}

#[tokio::test]
async fn rejected_and_failed_submissions_show_danger_toast() {
    let (route, submissions) =
        phishing_route(json!({"success": false, "message": "template missing"}));
    let server = StubServer::start(Router::new().route(PHISHING_SIMULATE_PATH, route)).await;
    let form = PhishingSimulationForm::new().with_field("name", "drill");
    let mut dispatcher = dispatcher();

    let (rejected_toast, rejected) =
        submit_phishing_simulation(&server.api(), &mut dispatcher, &form, "tok").await;
    assert_eq!(
        rejected.expect("outcome"),
        PhishingOutcome::Rejected {
            message: Some("template missing".to_owned())
        }
    );
    assert_eq!(submissions.lock().expect("lock").len(), 1);

    let broken = StubServer::start(Router::new().route(
        PHISHING_SIMULATE_PATH,
        canned(StatusCode::BAD_GATEWAY, "bad gateway"),
    ))
    .await;
    let (failed_toast, failed) =
        submit_phishing_simulation(&broken.api(), &mut dispatcher, &form, "tok").await;
    assert!(matches!(
        failed,
        Err(DashboardError::HttpStatus { status: 502, .. })
    ));

    for id in [rejected_toast, failed_toast] {
        let toast = dispatcher.container().get(id).expect("toast");
        assert_eq!(toast.message, PHISHING_FAILED_MESSAGE);
        assert_eq!(toast.severity, Severity::Danger);
    }
    assert_eq!(dispatcher.container().len(), 2);
}

#[test]
fn csrf_token_requires_meta_tag() {
    let document = StaticDocument::new();
    assert!(csrf_token(&document, "csrf-token").is_err());
    let empty = StaticDocument::new().with_meta("csrf-token", "");
    assert!(csrf_token(&empty, "csrf-token").is_err());
}
