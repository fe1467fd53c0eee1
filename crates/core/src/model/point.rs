use chrono::{DateTime, Utc};

/// A single timestamped datum on the timeline.
///
/// The payload is opaque to the engine: never cloned, never mutated, only
/// handed back by reference to interaction callbacks. Clusters refer to
/// points by index into the caller-supplied ordered slice, so the caller's
/// ordering is preserved end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint<P> {
    pub ts: DateTime<Utc>,
    pub payload: P,
}

impl<P> TimePoint<P> {
    pub fn new(ts: DateTime<Utc>, payload: P) -> Self {
        Self { ts, payload }
    }

    /// Timestamp as fractional milliseconds since the Unix epoch, the unit
    /// all layout math runs in.
    pub fn ts_ms(&self) -> f64 {
        self.ts.timestamp_millis() as f64
    }
}
