use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("anchor `{anchor}` is missing attribute `{attribute}`")]
    MissingAttribute { anchor: String, attribute: String },

    #[error("anchor `{anchor}` has invalid attribute `{attribute}`: {reason}")]
    InvalidAttribute {
        anchor: String,
        attribute: String,
        reason: String,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("request to `{url}` failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to `{url}` returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to decode response from `{url}`: {reason}")]
    Decode { url: String, reason: String },

    #[error("unknown toast id: {0}")]
    UnknownToast(u64),
}

impl DashboardError {
    pub(crate) fn invalid_attribute(
        anchor: &str,
        attribute: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            anchor: anchor.to_owned(),
            attribute: attribute.to_owned(),
            reason: reason.into(),
        }
    }
}
