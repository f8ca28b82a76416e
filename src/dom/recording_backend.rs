use tracing::trace;

use crate::charts::ChartConfig;
use crate::dom::{ChartBackend, ChartHandle};
use crate::error::DashboardResult;

#[derive(Debug, Clone, PartialEq)]
pub struct MountedChart {
    pub handle: ChartHandle,
    pub anchor_id: String,
    pub config: ChartConfig,
}

/// Backend used by tests and headless runs.
///
/// It still validates each config so tests catch bad chart payloads before
/// a real charting library sees them.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_handle: u64,
    mounted: Vec<MountedChart>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mounted(&self) -> &[MountedChart] {
        &self.mounted
    }

    pub fn mounted_on<'a>(&'a self, anchor_id: &'a str) -> impl Iterator<Item = &'a MountedChart> {
        self.mounted
            .iter()
            .filter(move |chart| chart.anchor_id == anchor_id)
    }
}

impl ChartBackend for RecordingBackend {
    fn mount(&mut self, anchor_id: &str, config: &ChartConfig) -> DashboardResult<ChartHandle> {
        config.validate()?;
        self.next_handle += 1;
        let handle = ChartHandle(self.next_handle);
        trace!(anchor_id, handle = handle.0, kind = ?config.kind, "mount chart");
        self.mounted.push(MountedChart {
            handle,
            anchor_id: anchor_id.to_owned(),
            config: config.clone(),
        });
        Ok(handle)
    }
}
