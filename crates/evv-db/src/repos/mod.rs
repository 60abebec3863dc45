//! libSQL implementations of the gateway traits.
//!
//! Each repo shares one `Arc<EvvDb>` and maps rows through a `row_to_*`
//! function over a fixed `SELECT_COLS` list.

mod schedule;
mod task;

pub use schedule::ScheduleRepo;
pub use task::TaskRepo;
