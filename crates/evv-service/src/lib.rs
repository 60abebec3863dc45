//! # evv-service
//!
//! Lifecycle components for EVV schedules and tasks.
//!
//! [`ScheduleLifecycle`] owns the visit state machine
//! (`upcoming → in-progress → completed`), the paginated listing, and the
//! detail view. [`TaskLifecycle`] owns task status changes. Both validate
//! requests before touching storage, talk to storage only through the
//! `evv-db` gateway traits, and translate storage failures into
//! [`evv_core::errors::ServiceError`].

mod error;
pub mod schedule;
pub mod task;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use evv_db::EvvDb;
use evv_db::repos::{ScheduleRepo, TaskRepo};

pub use schedule::ScheduleLifecycle;
pub use task::TaskLifecycle;

/// Both lifecycle components wired to one database.
#[derive(Clone)]
pub struct EvvService {
    pub schedules: ScheduleLifecycle,
    pub tasks: TaskLifecycle,
}

impl EvvService {
    #[must_use]
    pub fn from_db(db: Arc<EvvDb>) -> Self {
        let task_repo = Arc::new(TaskRepo::new(Arc::clone(&db)));
        Self {
            schedules: ScheduleLifecycle::new(Arc::new(ScheduleRepo::new(db)), task_repo.clone()),
            tasks: TaskLifecycle::new(task_repo),
        }
    }
}
