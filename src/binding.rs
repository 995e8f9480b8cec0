use std::sync::Arc;
use std::time::Duration;

use ringlog::*;
use serde::{Deserialize, Serialize};

use crate::series::Unit;
use crate::store::MetricStore;
use crate::window::{TimeWindow, WindowReader};

/// One metric tracked by a widget binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub unit: Unit,
    /// Interval-bucketed metrics carry the window interval in their fetch.
    pub interval_bucketed: bool,
}

/// Outward fetch/reset intents. The collaborator behind this trait performs
/// the actual I/O and delivers results through [`MetricStore::complete_fetch`]
/// with the epoch it was handed here.
pub trait MetricDispatch {
    fn fetch(&self, metric: &str, from: i64, to: i64, interval: Option<Duration>, epoch: u64);
    fn reset(&self, metric: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Inactive,
    Active { last_from: i64 },
}

/// Per-widget fetch lifecycle tied to the shared time window.
///
/// Activation issues one fetch per tracked metric; a window change re-issues
/// them all together, but only when the window start moved (the start boundary
/// is authoritative for cache-busting). Deactivation resets every tracked
/// metric and advances its epoch so a late result for this activation cannot
/// become visible. Epochs move only for this binding's own metrics, so other
/// bindings sharing the store keep their in-flight fetches.
pub struct MetricBinding<D: MetricDispatch> {
    metrics: Vec<MetricSpec>,
    dispatch: D,
    store: Arc<MetricStore>,
    state: State,
}

impl<D: MetricDispatch> MetricBinding<D> {
    pub fn new(metrics: Vec<MetricSpec>, dispatch: D, store: Arc<MetricStore>) -> Self {
        Self {
            metrics,
            dispatch,
            store,
            state: State::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Activate the binding, fetching every tracked metric for `window`.
    ///
    /// Must be called exactly once per activation; activating an already
    /// active binding is a caller error.
    pub fn activate(&mut self, window: &TimeWindow) {
        assert!(
            self.state == State::Inactive,
            "binding already active: activate() called twice without deactivate()"
        );

        self.fetch_all(window);
        self.state = State::Active {
            last_from: window.from,
        };
    }

    /// React to a change of the shared time window.
    ///
    /// All tracked metrics are re-fetched together when the window start
    /// differs from the last observed one. A change confined to `to` or
    /// `interval` does not re-fetch.
    pub fn on_window_change(&mut self, window: &TimeWindow) {
        let State::Active { last_from } = self.state else {
            return;
        };

        if window.from == last_from {
            return;
        }

        self.fetch_all(window);
        self.state = State::Active {
            last_from: window.from,
        };
    }

    /// Deactivate the binding, resetting every tracked metric.
    ///
    /// Runs the same cleanup on every teardown path. After this returns, a
    /// result from a fetch issued before deactivation is discarded by the
    /// store's epoch check.
    pub fn deactivate(&mut self) {
        if self.state == State::Inactive {
            return;
        }

        for metric in &self.metrics {
            debug!("resetting {}", metric.name);
            self.store.advance_epoch(&metric.name);
            self.dispatch.reset(&metric.name);
            self.store.clear(&metric.name);
        }

        self.state = State::Inactive;
    }

    /// Reconcile with the externally-owned window: activates on first call,
    /// afterwards behaves like [`Self::on_window_change`].
    pub fn sync(&mut self, windows: &dyn WindowReader) {
        let window = windows.current_window();

        match self.state {
            State::Inactive => self.activate(&window),
            State::Active { .. } => self.on_window_change(&window),
        }
    }

    fn fetch_all(&self, window: &TimeWindow) {
        for metric in &self.metrics {
            let epoch = self.store.advance_epoch(&metric.name);
            let interval = metric.interval_bucketed.then_some(window.interval);

            debug!(
                "fetching {} for window [{}, {}]",
                metric.name, window.from, window.to
            );
            self.dispatch
                .fetch(&metric.name, window.from, window.to, interval, epoch);
        }
    }
}
