use std::time::Duration;

use crate::error::Error;

/// The externally-owned time window controlling what range metric fetches
/// cover. Timestamps are unix seconds.
///
/// The window is mutated only by the surrounding application's time controls.
/// This crate reads it through [`WindowReader`] and reacts to changes; nothing
/// here writes it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: i64,
    pub to: i64,
    pub interval: Duration,
}

impl TimeWindow {
    pub fn new(from: i64, to: i64, interval: Duration) -> Result<Self, Error> {
        if from > to {
            return Err(Error::InvalidWindow(format!(
                "from ({from}) is after to ({to})"
            )));
        }
        if interval.is_zero() {
            return Err(Error::InvalidWindow("interval must be non-zero".to_string()));
        }
        Ok(Self { from, to, interval })
    }
}

/// Read access to the shared time window.
///
/// Implemented by the surrounding application's store. Bindings call this when
/// reconciling instead of holding a reference into application state.
pub trait WindowReader {
    fn current_window(&self) -> TimeWindow;
}
