//! Host seams: where anchors come from and where chart configs go.
//!
//! A browser host implements `Document` and `ChartBackend` over the real DOM
//! and charting library. `StaticDocument` and `RecordingBackend` are the
//! in-memory versions used for headless runs and tests.

mod recording_backend;
mod static_document;

pub use recording_backend::{MountedChart, RecordingBackend};
pub use static_document::{StaticDocument, StaticElement};

use serde::{Deserialize, Serialize};

use crate::charts::ChartConfig;
use crate::error::DashboardResult;

/// A mount point identified by a fixed element id.
pub trait Anchor {
    fn id(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// Absolutely positioned child drawn over an anchor (e.g. the gauge label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub classes: Vec<String>,
    pub inner_html: String,
}

pub trait Document {
    fn anchor(&self, id: &str) -> Option<&dyn Anchor>;

    /// Appends `overlay` to the anchor's parent and makes that parent the
    /// positioning context.
    fn append_overlay(&mut self, anchor_id: &str, overlay: Overlay) -> DashboardResult<()>;

    /// Content of `<meta name="{name}">`, if present.
    fn meta_content(&self, name: &str) -> Option<&str>;
}

/// Opaque identity of one chart instance created by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartHandle(pub u64);

/// Contract implemented by whatever draws charts.
///
/// Backends receive a fully built `ChartConfig`; they never see raw
/// attribute strings.
pub trait ChartBackend {
    fn mount(&mut self, anchor_id: &str, config: &ChartConfig) -> DashboardResult<ChartHandle>;
}
