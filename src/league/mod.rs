//! Provider layer: owns the record store and exposes the league to a front end.

pub mod dashboard;
pub mod notifications;
pub mod service;
pub mod session;

pub use dashboard::DashboardSummary;
pub use notifications::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use service::LeagueService;
pub use session::{MatchSession, RecordingMode, SessionPhase};
