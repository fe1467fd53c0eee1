use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::domain::{TimeDomain, datetime_from_ms};
use crate::transform::ZoomTransform;

/// Linear mapping between a time domain and a pixel range.
///
/// The engine keeps one base scale (padded domain → full viewport width) and
/// derives the visible mapping from it through [`TimeScale::rescaled`] on
/// every transform change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain: TimeDomain,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: TimeDomain, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> TimeDomain {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Pixel position of an instant.
    pub fn project(&self, ts: DateTime<Utc>) -> f64 {
        self.project_ms(ts.timestamp_millis() as f64)
    }

    /// Pixel position of a millisecond timestamp.
    ///
    /// A degenerate (zero-width) domain maps every instant to the midpoint
    /// of the range: a single-timestamp data set renders as one column
    /// rather than dividing by zero.
    pub fn project_ms(&self, ms: f64) -> f64 {
        let span = self.domain.span_ms();
        if span <= 0.0 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        let t = (ms - self.domain.min_ms()) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Instant at a pixel position.
    pub fn invert(&self, px: f64) -> DateTime<Utc> {
        datetime_from_ms(self.invert_ms(px))
    }

    /// Millisecond timestamp at a pixel position. Degenerate domains and
    /// zero-width ranges answer with the domain start.
    pub fn invert_ms(&self, px: f64) -> f64 {
        let extent = self.range.1 - self.range.0;
        if extent == 0.0 || self.domain.span_ms() <= 0.0 {
            return self.domain.min_ms();
        }
        let t = (px - self.range.0) / extent;
        self.domain.min_ms() + t * self.domain.span_ms()
    }

    /// The scale seen through a zoom transform: same pixel range, domain
    /// narrowed to the window the transform makes visible.
    pub fn rescaled(&self, transform: ZoomTransform) -> Self {
        let min_ms = self.invert_ms(transform.unapply(self.range.0));
        let max_ms = self.invert_ms(transform.unapply(self.range.1));
        Self {
            domain: TimeDomain {
                min: datetime_from_ms(min_ms),
                max: datetime_from_ms(max_ms),
            },
            range: self.range,
        }
    }
}
