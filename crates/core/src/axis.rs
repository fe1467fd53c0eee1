use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::domain::datetime_from_ms;
use crate::scale::TimeScale;

/// Target pixel spacing between adjacent ticks.
const TICK_SPACING_PX: f64 = 90.0;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// A labeled axis tick: the domain-to-pixel mapping handed to the rendering
/// surface for axis drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub x: f64,
    pub ts: DateTime<Utc>,
    pub label: String,
}

/// Ticks for the visible mapping.
///
/// Steps come from a 1-2-5-style ladder of calendar-friendly intervals
/// (seconds through years), aligned numerically on epoch milliseconds, and
/// are chosen so adjacent ticks land roughly [`TICK_SPACING_PX`] apart.
/// Degenerate domains produce no ticks.
pub fn ticks(scale: &TimeScale, view_width: f64) -> Vec<Tick> {
    let domain = scale.domain();
    let span = domain.span_ms();
    if span <= 0.0 || view_width <= 0.0 {
        return Vec::new();
    }

    let target = (view_width / TICK_SPACING_PX).max(2.0);
    let step = nice_step(span / target);

    let mut out = Vec::new();
    let mut t = (domain.min_ms() / step).ceil() * step;
    while t <= domain.max_ms() {
        let x = scale.project_ms(t);
        if x >= 0.0 && x <= view_width {
            let ts = datetime_from_ms(t);
            out.push(Tick {
                x,
                ts,
                label: format_tick(ts, step),
            });
        }
        t += step;
    }
    out
}

/// Smallest ladder step at least as large as the raw interval. Beyond a
/// decade the ladder falls back to powers of ten of years.
fn nice_step(raw_ms: f64) -> f64 {
    const LADDER: &[f64] = &[
        SECOND_MS,
        2.0 * SECOND_MS,
        5.0 * SECOND_MS,
        15.0 * SECOND_MS,
        30.0 * SECOND_MS,
        MINUTE_MS,
        2.0 * MINUTE_MS,
        5.0 * MINUTE_MS,
        15.0 * MINUTE_MS,
        30.0 * MINUTE_MS,
        HOUR_MS,
        3.0 * HOUR_MS,
        6.0 * HOUR_MS,
        12.0 * HOUR_MS,
        DAY_MS,
        2.0 * DAY_MS,
        7.0 * DAY_MS,
        14.0 * DAY_MS,
        MONTH_MS,
        3.0 * MONTH_MS,
        6.0 * MONTH_MS,
        YEAR_MS,
        2.0 * YEAR_MS,
        5.0 * YEAR_MS,
        10.0 * YEAR_MS,
    ];
    for &step in LADDER {
        if step >= raw_ms {
            return step;
        }
    }
    let mut step = 10.0 * YEAR_MS;
    while step < raw_ms {
        step *= 10.0;
    }
    step
}

/// Label format tracks the step granularity: year steps label years, day
/// steps label dates, sub-minute steps label wall-clock times.
fn format_tick(ts: DateTime<Utc>, step_ms: f64) -> String {
    let fmt = if step_ms >= YEAR_MS {
        "%Y"
    } else if step_ms >= MONTH_MS {
        "%b %Y"
    } else if step_ms >= DAY_MS {
        "%b %d"
    } else if step_ms >= HOUR_MS {
        "%b %d %H:%M"
    } else if step_ms >= MINUTE_MS {
        "%H:%M"
    } else {
        "%H:%M:%S"
    };
    ts.format(fmt).to_string()
}
