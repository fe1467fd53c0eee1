use serde::{Deserialize, Serialize};

use crate::model::TimeDomain;

/// Horizontal zoom/pan state applied on top of the base domain→range
/// mapping: `screen_x = k · base_x + x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    /// Zoom scale.
    pub k: f64,
    /// Horizontal translation in pixels.
    pub x: f64,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    pub fn new(k: f64, x: f64) -> Self {
        Self { k, x }
    }

    pub fn apply(&self, base_x: f64) -> f64 {
        self.k * base_x + self.x
    }

    pub fn unapply(&self, screen_x: f64) -> f64 {
        (screen_x - self.x) / self.k
    }

    /// Scale by `factor`, keeping the screen position `anchor_x` fixed.
    pub fn scaled_by(&self, factor: f64, anchor_x: f64) -> Self {
        let k = self.k * factor;
        let x = anchor_x - (anchor_x - self.x) * (k / self.k);
        Self { k, x }
    }

    /// Normalize a candidate transform against the zoom bounds and the
    /// translate extent of a `view_width`-wide window.
    ///
    /// A non-positive or non-finite scale is corrupt gesture input and
    /// snaps to the minimum zoom before clamping. The translation is then
    /// bounded so the visible window never leaves the domain's pixel
    /// extent.
    pub fn clamped(&self, extent: ZoomExtent, view_width: f64) -> Self {
        let k = if self.k.is_finite() && self.k > 0.0 {
            self.k
        } else {
            extent.min
        };
        let k = k.clamp(extent.min, extent.max);
        let lo = (view_width * (1.0 - k)).min(0.0);
        let x = if self.x.is_finite() {
            self.x.clamp(lo, 0.0)
        } else {
            0.0
        };
        Self { k, x }
    }
}

/// Allowed zoom scale bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomExtent {
    pub min: f64,
    pub max: f64,
}

impl ZoomExtent {
    /// `min` is always 1 (the fitted view); `max` resolves the padded
    /// domain down to one-minute granularity, and never drops below `min`.
    pub fn for_domain(domain: &TimeDomain) -> Self {
        Self {
            min: 1.0,
            max: domain.minutes().max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: ZoomExtent = ZoomExtent {
        min: 1.0,
        max: 100.0,
    };

    #[test]
    fn apply_unapply_round_trip() {
        let t = ZoomTransform::new(3.0, -120.0);
        let screen = t.apply(250.0);
        assert!((t.unapply(screen) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_by_keeps_anchor_fixed() {
        let t = ZoomTransform::new(2.0, -100.0);
        let anchor = 450.0;
        let base_at_anchor = t.unapply(anchor);
        let zoomed = t.scaled_by(2.0, anchor);
        assert!((zoomed.apply(base_at_anchor) - anchor).abs() < 1e-9);
    }

    #[test]
    fn negative_gesture_scale_snaps_to_minimum() {
        // The gesture layer has been observed reporting k = -1; any
        // non-positive scale is treated the same way.
        let t = ZoomTransform::new(-1.0, 0.0).clamped(EXTENT, 900.0);
        assert_eq!(t.k, 1.0);
        let t = ZoomTransform::new(0.0, 0.0).clamped(EXTENT, 900.0);
        assert_eq!(t.k, 1.0);
        let t = ZoomTransform::new(f64::NAN, 0.0).clamped(EXTENT, 900.0);
        assert_eq!(t.k, 1.0);
    }

    #[test]
    fn scale_clamps_into_extent() {
        let t = ZoomTransform::new(250.0, 0.0).clamped(EXTENT, 900.0);
        assert_eq!(t.k, 100.0);
        let t = ZoomTransform::new(0.3, 0.0).clamped(EXTENT, 900.0);
        assert_eq!(t.k, 1.0);
    }

    #[test]
    fn translation_bounded_by_visible_window() {
        // At k=2 over a 900px view, x may range over [-900, 0].
        let t = ZoomTransform::new(2.0, -5_000.0).clamped(EXTENT, 900.0);
        assert_eq!(t.x, -900.0);
        let t = ZoomTransform::new(2.0, 300.0).clamped(EXTENT, 900.0);
        assert_eq!(t.x, 0.0);
    }

    #[test]
    fn extent_for_domain_floors_at_identity() {
        let degenerate = TimeDomain::from_instants([chrono::DateTime::UNIX_EPOCH])
            .expect("single instant");
        let extent = ZoomExtent::for_domain(&degenerate);
        assert_eq!(extent.min, 1.0);
        assert_eq!(extent.max, 1.0);
    }
}
