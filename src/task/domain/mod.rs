//! Domain model for the task lifecycle.
//!
//! The domain holds the task entity, its status state machine, and the
//! validated scalar values it is built from. Nothing here owns a collection
//! of tasks; that is the job of the services layer.

mod error;
mod ids;
mod patch;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{Hours, ProjectId, TaskId, TaskTitle, UserId};
pub use patch::TaskPatch;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTaskData, Task, normalize_tag};
