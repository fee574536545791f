//! # Refresh Scheduler
//!
//! One timer task per registered source, all answering to a single stop
//! signal. State lives in the scheduler value itself, so dropping it (or
//! calling [`RefreshScheduler::stop`]) is enough to wind everything down.
//! The first tick fires one full interval after `start`; callers that want
//! an immediate pass run `refresh_all` themselves first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metrics::counter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::refresh::RefreshEngine;

/// Default gap between refresh cycles for every source.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[derive(Default)]
struct Inner {
    timers: HashMap<&'static str, JoinHandle<()>>,
    stop_tx: Option<watch::Sender<bool>>,
}

/// Drives periodic refreshes for every source in the engine's catalog.
pub struct RefreshScheduler {
    engine: Arc<RefreshEngine>,
    inner: Mutex<Inner>,
}

impl RefreshScheduler {
    pub fn new(engine: Arc<RefreshEngine>) -> Self {
        Self {
            engine,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Spawn one timer per source, replacing any timers from an earlier
    /// `start`. Ticks that pile up behind a slow refresh are delayed, not
    /// burst-replayed.
    pub fn start(&self, every: Duration) {
        let mut inner = self.inner.lock().expect("scheduler mutex poisoned");
        Self::cancel(&mut inner);

        let (stop_tx, stop_rx) = watch::channel(false);
        for src in self.engine.sources() {
            let engine = Arc::clone(&self.engine);
            let id = src.id;
            let mut stop = stop_rx.clone();
            let handle = tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + every, every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        biased;
                        _ = stop.changed() => break,
                        _ = ticker.tick() => {
                            counter!("scheduler_ticks_total", "source" => id).increment(1);
                            if let Err(e) = engine.refresh_source(id).await {
                                warn!(error = %e, source = id, "scheduled refresh failed");
                            }
                        }
                    }
                }
            });
            inner.timers.insert(id, handle);
        }
        inner.stop_tx = Some(stop_tx);

        info!(
            sources = inner.timers.len(),
            interval_secs = every.as_secs(),
            "refresh scheduler started"
        );
    }

    /// Stop all timers. A refresh already in flight on some timer finishes;
    /// no new ticks fire after this returns.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().expect("scheduler mutex poisoned");
        if inner.stop_tx.is_some() {
            Self::cancel(&mut inner);
            info!("refresh scheduler stopped");
        }
    }

    /// Number of live timer tasks.
    pub fn active_timers(&self) -> usize {
        self.inner
            .lock()
            .expect("scheduler mutex poisoned")
            .timers
            .len()
    }

    pub fn engine(&self) -> &Arc<RefreshEngine> {
        &self.engine
    }

    fn cancel(inner: &mut Inner) {
        if let Some(tx) = inner.stop_tx.take() {
            let _ = tx.send(true);
        }
        // Dropped handles detach; each task breaks on the stop signal once
        // any in-flight refresh completes.
        inner.timers.clear();
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            Self::cancel(&mut inner);
        }
    }
}
