//! Transient toast notifications.

mod dispatcher;
mod toast;

pub use dispatcher::NotificationDispatcher;
pub use toast::{Severity, Toast, ToastContainer, ToastId, ToastPlacement, ToastState};
