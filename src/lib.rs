//! cybershield-dashboard: presentation core of the CyberShield security dashboard.
//!
//! The crate builds chart payloads from page markup or live stats, scores
//! passwords and security posture, manages toast notifications and talks to
//! the backend's JSON endpoints. Hosts plug in through the `dom` traits.

pub mod api;
pub mod app;
pub mod charts;
pub mod config;
pub mod core;
pub mod dom;
pub mod error;
pub mod initializer;
pub mod notify;
pub mod telemetry;

pub use app::Dashboard;
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use initializer::{ChartInitializer, ChartOutcome, InitReport};
pub use notify::{NotificationDispatcher, Severity};
