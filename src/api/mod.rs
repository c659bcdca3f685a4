// src/api/mod.rs

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;

use crate::models::{Snapshot, WidgetParams};
use crate::pipeline::run_cycle;
use crate::utils::TaoStatsApi;
use crate::widget::WidgetSize;

pub mod handlers;

pub use handlers::{get_snapshot, get_widget, health};

/// State shared between the refresh task and the HTTP handlers.
pub struct AppState {
    /// Latest snapshot of the default parameters; replaced every cycle.
    pub latest: Mutex<Option<Snapshot>>,
    pub api: Arc<dyn TaoStatsApi>,
    pub defaults: WidgetParams,
    pub default_size: WidgetSize,
    pub refresh_interval: Duration,
}

impl AppState {
    pub fn new(
        api: Arc<dyn TaoStatsApi>,
        defaults: WidgetParams,
        default_size: WidgetSize,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            latest: Mutex::new(None),
            api,
            defaults,
            default_size,
            refresh_interval,
        }
    }

    fn lock_latest(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.lock_latest().clone()
    }

    /// Runs a fresh cycle for arbitrary parameters without touching the
    /// cached snapshot.
    pub async fn cycle(&self, params: &WidgetParams) -> Snapshot {
        run_cycle(self.api.as_ref(), params, Utc::now(), self.refresh_interval).await
    }
}

/// Refreshes the cached snapshot for the default parameters.
pub async fn refresh_once(state: &AppState) {
    let snapshot = state.cycle(&state.defaults).await;
    *state.lock_latest() = Some(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fetch::{METAGRAPH_PATH, POOL_PATH, PRICE_PATH};
    use crate::utils::stub::StubApi;
    use serde_json::json;

    #[tokio::test]
    async fn refresh_replaces_latest_snapshot() {
        let api = StubApi::new()
            .with(METAGRAPH_PATH, json!({ "data": [{ "uid": 1, "daily_reward": 1e9, "alpha_stake": 2e9 }] }))
            .with(POOL_PATH, json!({ "data": [{ "price": 0.01 }] }))
            .with(PRICE_PATH, json!({ "data": [{ "price": 300.0 }] }));
        let state = AppState::new(
            Arc::new(api),
            WidgetParams::parse("16 | 1").unwrap(),
            WidgetSize::Small,
            Duration::from_secs(300),
        );
        assert!(state.latest().is_none());

        refresh_once(&state).await;
        let first = state.latest().expect("snapshot after refresh");
        assert_eq!(first.resolved_count(), 1);

        refresh_once(&state).await;
        let second = state.latest().unwrap();
        assert!(second.updated_at >= first.updated_at);
    }
}
