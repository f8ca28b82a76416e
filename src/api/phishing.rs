use indexmap::IndexMap;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::DashboardApi;
use crate::api::client::{PHISHING_SIMULATE_PATH, decode_json};
use crate::dom::Document;
use crate::error::{DashboardError, DashboardResult};
use crate::notify::{NotificationDispatcher, Severity, ToastId};

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const PHISHING_CREATED_MESSAGE: &str = "Phishing simulation created successfully";
pub const PHISHING_FAILED_MESSAGE: &str = "Error creating phishing simulation";

/// Field values of the phishing simulation form, sent as multipart parts in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhishingSimulationForm {
    fields: IndexMap<String, String>,
}

impl PhishingSimulationForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    fn to_multipart(&self) -> Form {
        self.fields
            .iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.clone(), value.clone())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishingResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhishingOutcome {
    Created,
    /// The server answered but reported `success: false`.
    Rejected { message: Option<String> },
}

/// Reads the CSRF token from `<meta name="{meta_name}" content="...">`.
pub fn csrf_token<D: Document + ?Sized>(document: &D, meta_name: &str) -> DashboardResult<String> {
    document
        .meta_content(meta_name)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| DashboardError::InvalidData(format!("missing csrf meta tag `{meta_name}`")))
}

impl DashboardApi {
    /// `POST /phishing/simulate` with the form as multipart body.
    pub async fn simulate_phishing(
        &self,
        form: &PhishingSimulationForm,
        csrf_token: &str,
    ) -> DashboardResult<PhishingOutcome> {
        let url = self.endpoint(PHISHING_SIMULATE_PATH)?;
        debug!(%url, fields = form.fields().len(), "submit phishing simulation");
        let response = self
            .client()
            .post(url.clone())
            .header(CSRF_HEADER, csrf_token)
            .header(ACCEPT, "application/json")
            .multipart(form.to_multipart())
            .send()
            .await
            .map_err(|source| DashboardError::Transport {
                url: url.to_string(),
                source,
            })?;
        let body: PhishingResponse = decode_json(&url, response).await?;
        Ok(if body.success {
            PhishingOutcome::Created
        } else {
            PhishingOutcome::Rejected {
                message: body.message,
            }
        })
    }
}

/// Submits the form and reports the result as a toast.
///
/// Rejections and transport failures show the same danger toast; the typed
/// result is still returned for callers that care which one happened.
pub async fn submit_phishing_simulation(
    api: &DashboardApi,
    dispatcher: &mut NotificationDispatcher,
    form: &PhishingSimulationForm,
    csrf_token: &str,
) -> (ToastId, DashboardResult<PhishingOutcome>) {
    let result = api.simulate_phishing(form, csrf_token).await;
    let toast = match &result {
        Ok(PhishingOutcome::Created) => dispatcher.show(PHISHING_CREATED_MESSAGE, Severity::Success),
        Ok(PhishingOutcome::Rejected { message }) => {
            warn!(reason = message.as_deref().unwrap_or(""), "phishing simulation rejected");
            dispatcher.show(PHISHING_FAILED_MESSAGE, Severity::Danger)
        }
        Err(err) => {
            warn!(error = %err, "phishing simulation request failed");
            dispatcher.show(PHISHING_FAILED_MESSAGE, Severity::Danger)
        }
    };
    (toast, result)
}
