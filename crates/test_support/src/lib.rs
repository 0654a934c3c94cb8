//! In-memory collaborators for exercising the identity core without
//! PostgreSQL, Redis or SMTP.

pub mod directory;
pub mod notifier;
pub mod plans;
pub mod store;

pub use directory::MemoryDirectory;
pub use notifier::{RecordingNotifier, SentEmail};
pub use plans::StaticPlanCatalog;
pub use store::UnavailableStore;
