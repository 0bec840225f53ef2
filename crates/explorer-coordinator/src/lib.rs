pub mod config;
pub mod coordinator;
pub mod notify;

pub use config::CoordinatorConfig;
pub use coordinator::{CoordinatorHandle, CoordinatorState, QueryCoordinator};
pub use notify::{LogNotifier, NotificationKind, Notifier};
