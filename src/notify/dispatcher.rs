use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::error::{DashboardError, DashboardResult};
use crate::notify::{Severity, Toast, ToastContainer, ToastId, ToastPlacement, ToastState};

/// Owns the toast container and every live toast in it.
///
/// Created once at startup and passed by `&mut` to whatever needs to notify.
/// There is no queue: each `show` appends an independent toast.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    container: ToastContainer,
    autohide_after: Duration,
    next_id: u64,
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(placement: ToastPlacement, autohide_after: Duration) -> Self {
        Self {
            container: ToastContainer::new(placement),
            autohide_after,
            next_id: 0,
        }
    }

    #[must_use]
    pub fn container(&self) -> &ToastContainer {
        &self.container
    }

    #[must_use]
    pub fn autohide_after(&self) -> Duration {
        self.autohide_after
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.show_at(message, severity, Utc::now())
    }

    pub fn show_info(&mut self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Info)
    }

    /// `show` with an explicit clock reading.
    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.container.append(Toast {
            id,
            message: message.into(),
            severity,
            state: ToastState::Showing,
            shown_at: now,
        });
        debug!(
            toast_id = id.0,
            %severity,
            live = self.container.len(),
            "show notification"
        );
        id
    }

    /// Starts the hide animation (close button or autohide).
    pub fn hide(&mut self, id: ToastId) -> DashboardResult<()> {
        let toast = self
            .container
            .get_mut(id)
            .ok_or(DashboardError::UnknownToast(id.0))?;
        toast.state = ToastState::Hiding;
        trace!(toast_id = id.0, "hide notification");
        Ok(())
    }

    /// Hidden event: the toast node is removed from the container.
    pub fn on_hidden(&mut self, id: ToastId) -> DashboardResult<Toast> {
        let toast = self
            .container
            .remove(id)
            .ok_or(DashboardError::UnknownToast(id.0))?;
        trace!(toast_id = id.0, live = self.container.len(), "remove notification");
        Ok(toast)
    }

    /// Begins hiding every showing toast older than the autohide delay.
    ///
    /// Returns the ids that started hiding.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<ToastId> {
        let autohide_after = self.autohide_after;
        let mut expired = Vec::new();
        for toast in self.container.toasts_mut() {
            if toast.state == ToastState::Showing && now - toast.shown_at >= autohide_after {
                toast.state = ToastState::Hiding;
                expired.push(toast.id);
            }
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "autohide notifications");
        }
        expired
    }
}
