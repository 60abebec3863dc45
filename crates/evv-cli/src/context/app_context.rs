use std::sync::Arc;

use anyhow::Context;
use evv_config::EvvConfig;
use evv_core::context::RequestContext;
use evv_db::EvvDb;
use evv_service::EvvService;
use tokio_util::sync::CancellationToken;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: EvvService,
    pub config: EvvConfig,
    cancel: CancellationToken,
}

impl AppContext {
    /// Open the configured database and wire the lifecycle components.
    pub async fn init(config: EvvConfig, cancel: CancellationToken) -> anyhow::Result<Self> {
        let db = EvvDb::open(&config.database)
            .await
            .context("failed to open evv database")?;
        Ok(Self::from_db(Arc::new(db), config, cancel))
    }

    pub fn from_db(db: Arc<EvvDb>, config: EvvConfig, cancel: CancellationToken) -> Self {
        Self {
            service: EvvService::from_db(db),
            config,
            cancel,
        }
    }

    /// A fresh request context bound to the process-wide cancel token and
    /// the configured deadline.
    pub fn request(&self) -> RequestContext {
        let ctx = RequestContext::background().with_token(self.cancel.child_token());
        match self.config.server.request_timeout() {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }
}

/// Fold command-line overrides into the loaded configuration.
///
/// `--database` always selects a local file, even when a remote database is
/// configured.
pub fn apply_overrides(config: &mut EvvConfig, flags: &GlobalFlags) {
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
        config.database.url.clear();
        config.database.auth_token.clear();
    }
    if let Some(timeout_ms) = flags.timeout_ms {
        config.server.request_timeout_ms = timeout_ms;
    }
}
