use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contextual color of a toast, matching the UI framework's `bg-*` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Light,
    Dark,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastState {
    Showing,
    /// Hide animation running; the node goes away on the hidden event.
    Hiding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub state: ToastState,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    #[must_use]
    pub fn class_attribute(&self) -> String {
        format!(
            "toast align-items-center text-white bg-{} border-0",
            self.severity
        )
    }

    /// Dismissible toast markup. The message is inserted as text.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<div class=\"{class}\" role=\"alert\" aria-live=\"assertive\" aria-atomic=\"true\" data-toast-id=\"{id}\">",
                "<div class=\"d-flex\">",
                "<div class=\"toast-body\">{message}</div>",
                "<button type=\"button\" class=\"btn-close btn-close-white me-2 m-auto\" data-bs-dismiss=\"toast\" aria-label=\"Close\"></button>",
                "</div>",
                "</div>"
            ),
            class = self.class_attribute(),
            id = self.id.0,
            message = escape_html(&self.message),
        )
    }
}

/// Corner of the viewport the toast stack is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPlacement {
    #[default]
    BottomEnd,
    BottomStart,
    TopEnd,
    TopStart,
}

impl ToastPlacement {
    #[must_use]
    pub fn position_classes(self) -> &'static str {
        match self {
            Self::BottomEnd => "bottom-0 end-0",
            Self::BottomStart => "bottom-0 start-0",
            Self::TopEnd => "top-0 end-0",
            Self::TopStart => "top-0 start-0",
        }
    }
}

/// Fixed-position stack holding live toasts in append order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastContainer {
    placement: ToastPlacement,
    toasts: Vec<Toast>,
}

impl ToastContainer {
    #[must_use]
    pub fn new(placement: ToastPlacement) -> Self {
        Self {
            placement,
            toasts: Vec::new(),
        }
    }

    #[must_use]
    pub fn placement(&self) -> ToastPlacement {
        self.placement
    }

    #[must_use]
    pub fn class_attribute(&self) -> String {
        format!(
            "toast-container position-fixed {} p-3",
            self.placement.position_classes()
        )
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id == id)
    }

    pub(crate) fn toasts_mut(&mut self) -> impl Iterator<Item = &mut Toast> {
        self.toasts.iter_mut()
    }

    pub(crate) fn append(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub(crate) fn remove(&mut self, id: ToastId) -> Option<Toast> {
        let position = self.toasts.iter().position(|toast| toast.id == id)?;
        Some(self.toasts.remove(position))
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let body: String = self.toasts.iter().map(Toast::to_html).collect();
        format!("<div class=\"{}\">{body}</div>", self.class_attribute())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
