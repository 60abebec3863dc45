pub mod dispatch;
pub mod schedule;
pub mod shared;
pub mod task;

pub use shared::envelope::Outcome;
