//! Shared test utilities for evv-db unit tests.

pub(crate) mod helpers {
    use std::sync::Arc;

    use crate::EvvDb;

    /// Fresh in-memory database with migrations applied.
    pub async fn test_db() -> Arc<EvvDb> {
        Arc::new(EvvDb::open_local(":memory:").await.unwrap())
    }
}
