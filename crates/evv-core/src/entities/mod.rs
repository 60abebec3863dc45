//! Entity structs for the EVV domain.
//!
//! Each entity maps to a table in the libSQL database (see
//! `evv-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema validation.

mod schedule;
mod task;

pub use schedule::{Schedule, VisitCheckpoint};
pub use task::Task;
