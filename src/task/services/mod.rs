//! Application services over the task domain.
//!
//! [`TaskDirectory`] owns the task collection; the [`analytics`] module
//! derives workload figures from it.

pub mod analytics;
mod config;
mod directory;
mod query;

pub use config::DirectoryConfig;
pub use directory::{BulkOutcome, TaskDirectory};
pub use query::{CreateTaskRequest, ListTasksQuery, TaskMetrics, TaskStats};
