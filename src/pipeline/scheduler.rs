// src/pipeline/scheduler.rs

//! Refresh scheduler.
//!
//! Drives refresh cycles from two triggers: a fixed-interval timer with
//! an immediate first cycle, and manual requests from the API. Both go
//! through [`RefreshScheduler::refresh_now`], which serializes cycles:
//! a manual trigger while a scheduled cycle is in flight waits for it
//! rather than interleaving commits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, MissedTickBehavior};

use crate::cache::CatalogCache;
use crate::models::Config;
use crate::services::Fetch;

use super::refresh::{RefreshOutcome, run_refresh};

/// Owns the refresh loop and the single logical writer to the cache.
pub struct RefreshScheduler {
    config: Arc<Config>,
    fetcher: Arc<dyn Fetch>,
    cache: Arc<CatalogCache>,
    /// Held for the duration of a cycle; guarantees no two cycles overlap.
    cycle_lock: Mutex<()>,
    active: AtomicBool,
}

impl RefreshScheduler {
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn Fetch>, cache: Arc<CatalogCache>) -> Self {
        Self {
            config,
            fetcher,
            cache,
            cycle_lock: Mutex::new(()),
            active: AtomicBool::new(false),
        }
    }

    /// Run one refresh cycle now, waiting for any in-flight cycle first.
    /// Shared by the timer and the manual API trigger.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let _guard = self.cycle_lock.lock().await;
        run_refresh(&self.config, self.fetcher.as_ref(), &self.cache).await
    }

    /// Whether the periodic loop is running.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Periodic refresh loop. The first cycle runs immediately; later
    /// cycles follow the configured interval. Never returns.
    pub async fn run(self: Arc<Self>) {
        self.active.store(true, Ordering::Relaxed);
        let period = Duration::from_secs(self.config.refresh.interval_secs);
        log::info!("Refresh scheduler started (every {:?})", period);

        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let outcome = self.refresh_now().await;
            log::info!(
                "Refresh complete: {} books ({} scraped / {} fallback categories)",
                outcome.total_books,
                outcome.scraped_categories,
                outcome.fallback_categories,
            );
        }
    }
}
