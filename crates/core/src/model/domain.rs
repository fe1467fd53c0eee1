use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Margin added to each side of the raw time extent, as a fraction of it.
const DOMAIN_PADDING: f64 = 0.05;

/// The time interval represented by the horizontal axis.
///
/// Computed once from the full point set with a 5% margin on each side and
/// replaced wholesale on data change. Zooming narrows the visible window
/// through the transform; the domain itself never moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDomain {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl TimeDomain {
    /// Padded domain over the given instants, or `None` for an empty set.
    pub fn from_instants<I>(instants: I) -> Option<Self>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for ts in instants {
            let ms = ts.timestamp_millis() as f64;
            min = min.min(ms);
            max = max.max(ms);
        }
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let offset = (max - min) * DOMAIN_PADDING;
        Some(Self {
            min: datetime_from_ms(min - offset),
            max: datetime_from_ms(max + offset),
        })
    }

    pub fn min_ms(&self) -> f64 {
        self.min.timestamp_millis() as f64
    }

    pub fn max_ms(&self) -> f64 {
        self.max.timestamp_millis() as f64
    }

    pub fn span_ms(&self) -> f64 {
        self.max_ms() - self.min_ms()
    }

    /// Zero-width domain: every point shares one timestamp.
    pub fn is_degenerate(&self) -> bool {
        self.span_ms() <= 0.0
    }

    /// Domain length in minutes. The maximum useful zoom resolves the full
    /// domain down to one-minute granularity.
    pub fn minutes(&self) -> f64 {
        self.span_ms() / 60_000.0
    }
}

/// Millisecond value back to an instant, saturating at the representable
/// bounds instead of failing.
pub(crate) fn datetime_from_ms(ms: f64) -> DateTime<Utc> {
    let clamped = ms.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    DateTime::from_timestamp_millis(clamped).unwrap_or(if ms < 0.0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
