use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::core::Palette;
use crate::error::{DashboardError, DashboardResult};
use crate::notify::ToastPlacement;

pub const DASHBOARD_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Host-facing dashboard setup.
///
/// Serializable so hosts can ship it inline in the page or load it from
/// disk without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_toast_autohide_ms")]
    pub toast_autohide_ms: u64,
    #[serde(default)]
    pub toast_placement: ToastPlacement,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default = "default_csrf_meta_name")]
    pub csrf_meta_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: DashboardConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            toast_autohide_ms: default_toast_autohide_ms(),
            toast_placement: ToastPlacement::default(),
            palette: Palette::default(),
            csrf_meta_name: default_csrf_meta_name(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_toast_autohide(mut self, autohide: Duration) -> Self {
        self.toast_autohide_ms = u64::try_from(autohide.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn toast_autohide(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(i64::try_from(self.toast_autohide_ms).unwrap_or(i64::MAX))
    }

    /// Parsed base URL; also the check `validate` runs.
    pub fn base_url(&self) -> DashboardResult<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            DashboardError::InvalidConfig(format!("base_url `{}` is not a URL: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DashboardError::InvalidConfig(format!(
                "base_url scheme must be http or https, got `{}`",
                url.scheme()
            )));
        }
        Ok(url)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        self.base_url()?;
        if self.request_timeout_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "request_timeout_ms must be > 0".to_owned(),
            ));
        }
        if self.toast_autohide_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "toast_autohide_ms must be > 0".to_owned(),
            ));
        }
        if self.csrf_meta_name.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "csrf_meta_name must not be empty".to_owned(),
            ));
        }
        self.palette
            .validate()
            .map_err(|e| DashboardError::InvalidConfig(format!("palette: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let payload = DashboardConfigJsonContractV1 {
            schema_version: DASHBOARD_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or the versioned envelope, and
    /// validates the result.
    ///
    /// A top-level `schema_version` key selects the envelope; errors inside
    /// it are reported, never retried as a bare config.
    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidConfig(format!("failed to parse config json: {e}"))
        })?;
        let is_envelope = value
            .as_object()
            .is_some_and(|object| object.contains_key("schema_version"));

        let config = if is_envelope {
            let payload: DashboardConfigJsonContractV1 =
                serde_json::from_value(value).map_err(|e| {
                    DashboardError::InvalidConfig(format!(
                        "failed to parse config contract v1: {e}"
                    ))
                })?;
            if payload.schema_version != DASHBOARD_CONFIG_JSON_SCHEMA_V1 {
                return Err(DashboardError::InvalidConfig(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value::<Self>(value).map_err(|e| {
                DashboardError::InvalidConfig(format!("failed to parse config json: {e}"))
            })?
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_owned()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_toast_autohide_ms() -> u64 {
    5_000
}

fn default_csrf_meta_name() -> String {
    "csrf-token".to_owned()
}
