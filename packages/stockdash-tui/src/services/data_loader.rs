//! Loads dashboard snapshots from the terminal thread.

use stockdash_core::{Dashboard, DashboardRequest, DashboardSnapshot};
use tokio::runtime::Runtime;

/// Runs dashboard loads on a dedicated runtime so the draw loop stays synchronous.
pub struct DataLoader {
    dashboard: Dashboard,
    runtime: Runtime,
}

impl DataLoader {
    pub fn new(dashboard: Dashboard) -> std::io::Result<Self> {
        Ok(Self {
            dashboard,
            runtime: Runtime::new()?,
        })
    }

    /// Fetch every section for `request`, blocking until all three finish.
    pub fn load(&self, request: &DashboardRequest) -> DashboardSnapshot {
        self.runtime.block_on(self.dashboard.load(request))
    }

    pub fn news_limit(&self) -> usize {
        self.dashboard.news_limit()
    }
}
