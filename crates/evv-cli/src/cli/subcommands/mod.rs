mod schedule;
mod task;

pub use schedule::ScheduleCommands;
pub use task::TaskCommands;
