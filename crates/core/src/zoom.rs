use crate::scale::TimeScale;
use crate::transform::{ZoomExtent, ZoomTransform};

/// Initial fit-to-domain transition length.
const FIT_DURATION_MS: f64 = 1500.0;
/// Programmatic zoom step transition length.
const STEP_DURATION_MS: f64 = 500.0;
const ZOOM_IN_FACTOR: f64 = 2.0;
const ZOOM_OUT_FACTOR: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPhase {
    /// First layout: animating from identity to the fit-to-domain view.
    Initializing,
    /// No transition in flight.
    Settled,
    /// A programmatic zoom transition is in flight.
    Transforming,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: ZoomTransform,
    to: ZoomTransform,
    duration_ms: f64,
    /// Stamped by the first `advance` call after scheduling.
    started_at: Option<f64>,
}

/// Owns the bounded scale/translate transform and its animated transitions.
///
/// Transitions are cooperative: the controller never pumps frames. The
/// caller's frame scheduler calls [`ZoomController::advance`] with its clock
/// and re-renders while it returns `true`. A new transform request always
/// supersedes a transition in flight — last write wins, nothing queues.
#[derive(Debug, Clone)]
pub struct ZoomController {
    current: ZoomTransform,
    extent: ZoomExtent,
    view_width: f64,
    phase: ZoomPhase,
    transition: Option<Transition>,
}

impl ZoomController {
    /// Settled controller at the identity transform.
    pub fn new(extent: ZoomExtent, view_width: f64) -> Self {
        Self {
            current: ZoomTransform::IDENTITY,
            extent,
            view_width,
            phase: ZoomPhase::Settled,
            transition: None,
        }
    }

    /// Controller in its initial state: identity transform, animating
    /// toward the transform under which the scale's whole domain fills its
    /// range.
    pub fn initializing(scale: &TimeScale, extent: ZoomExtent) -> Self {
        let (r0, r1) = scale.range();
        let view_width = r1 - r0;
        let mut controller = Self::new(extent, view_width);
        controller.phase = ZoomPhase::Initializing;
        controller.transition = Some(Transition {
            from: ZoomTransform::IDENTITY,
            to: fit_transform(scale).clamped(extent, view_width),
            duration_ms: FIT_DURATION_MS,
            started_at: None,
        });
        controller
    }

    pub fn transform(&self) -> ZoomTransform {
        self.current
    }

    pub fn phase(&self) -> ZoomPhase {
        self.phase
    }

    pub fn extent(&self) -> ZoomExtent {
        self.extent
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Apply a gesture-supplied transform immediately, superseding any
    /// transition in flight. The candidate is normalized first, so corrupt
    /// gesture scales never propagate.
    pub fn set_transform(&mut self, candidate: ZoomTransform) {
        self.transition = None;
        self.current = candidate.clamped(self.extent, self.view_width);
        self.phase = ZoomPhase::Settled;
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(ZOOM_OUT_FACTOR);
    }

    /// Animated scale step anchored at the viewport center. A transition
    /// already in flight is superseded, but its target seeds the step, so
    /// back-to-back calls compose deterministically regardless of how far
    /// the superseded animation got.
    fn zoom_by(&mut self, factor: f64) {
        let from = self.current;
        let base = self.transition.take().map_or(self.current, |t| t.to);
        let to = base
            .scaled_by(factor, self.view_width / 2.0)
            .clamped(self.extent, self.view_width);
        self.phase = ZoomPhase::Transforming;
        self.transition = Some(Transition {
            from,
            to,
            duration_ms: STEP_DURATION_MS,
            started_at: None,
        });
    }

    /// Step the active transition to `now_ms`. Returns `true` whenever the
    /// transform moved (the caller should re-layout, and keep scheduling
    /// frames while [`ZoomController::is_animating`]).
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let Some(mut transition) = self.transition else {
            return false;
        };
        let started = *transition.started_at.get_or_insert(now_ms);
        let t = if transition.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - started) / transition.duration_ms).clamp(0.0, 1.0)
        };
        if t >= 1.0 {
            self.current = transition.to;
            self.transition = None;
            self.phase = ZoomPhase::Settled;
        } else {
            self.current = lerp(transition.from, transition.to, ease_cubic_in_out(t));
            self.transition = Some(transition);
        }
        true
    }
}

/// Transform under which the scale's full domain exactly fills its range.
///
/// With the base mapping (padded domain already spanning the range) this is
/// the identity; after the range has gone stale it recenters. Degenerate
/// domains fit trivially.
pub fn fit_transform(scale: &TimeScale) -> ZoomTransform {
    let (r0, r1) = scale.range();
    let width = r1 - r0;
    let d0 = scale.project(scale.domain().min);
    let d1 = scale.project(scale.domain().max);
    let extent = d1 - d0;
    if width <= 0.0 || extent <= 0.0 {
        return ZoomTransform::IDENTITY;
    }
    let k = width / extent;
    ZoomTransform::new(k, r0 - k * d0)
}

fn ease_cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        1.0 + u * u * u / 2.0
    }
}

fn lerp(from: ZoomTransform, to: ZoomTransform, t: f64) -> ZoomTransform {
    ZoomTransform::new(from.k + (to.k - from.k) * t, from.x + (to.x - from.x) * t)
}
