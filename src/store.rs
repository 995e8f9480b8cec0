use std::collections::HashMap;

use parking_lot::Mutex;
use ringlog::*;

use crate::payload::RawSeriesPayload;

/// Read model of the external metric store.
///
/// The fetch collaborator delivers results into this store; bindings and
/// renderers read from it. Each metric carries its own epoch counter, advanced
/// by the binding that tracks it on every activation, window change, and
/// deactivation. A result carrying an old epoch is discarded instead of
/// resurrecting stale data, covering both a superseded in-flight fetch and a
/// result arriving after `deactivate()`. Because the epoch is per metric,
/// bindings sharing one store never invalidate each other's in-flight
/// fetches.
#[derive(Default)]
pub struct MetricStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    epochs: HashMap<String, u64>,
    slots: HashMap<String, RawSeriesPayload>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch that a fetch intent for `metric` dispatched now should carry.
    pub fn epoch(&self, metric: &str) -> u64 {
        self.inner.lock().epochs.get(metric).copied().unwrap_or(0)
    }

    /// Invalidate in-flight fetches for `metric` and return the new epoch.
    pub fn advance_epoch(&self, metric: &str) -> u64 {
        let mut inner = self.inner.lock();
        let epoch = inner.epochs.entry(metric.to_string()).or_insert(0);
        *epoch += 1;
        *epoch
    }

    /// Deliver a fetch result. `epoch` is the value captured at dispatch time;
    /// results from a superseded epoch are dropped.
    pub fn complete_fetch(&self, metric: &str, epoch: u64, payload: RawSeriesPayload) {
        let mut inner = self.inner.lock();
        let current = inner.epochs.get(metric).copied().unwrap_or(0);

        if epoch != current {
            debug!("discarding stale result for {metric}: epoch {epoch}, current {current}");
            return;
        }

        inner.slots.insert(metric.to_string(), payload);
    }

    /// Release the cached payload for `metric`.
    pub fn clear(&self, metric: &str) {
        self.inner.lock().slots.remove(metric);
    }

    /// Current payload for `metric`; `None` means no data has arrived.
    pub fn payload(&self, metric: &str) -> Option<RawSeriesPayload> {
        self.inner.lock().slots.get(metric).cloned()
    }
}
