use crate::layout::Layout;

/// Index of the topmost mark containing the pointer, if any.
///
/// Marks are ordered singletons-then-clusters, so scanning from the end
/// gives clusters priority — the same stacking the rendering surface
/// paints.
pub fn hit_test(layout: &Layout, x: f64, y: f64) -> Option<usize> {
    layout.marks.iter().enumerate().rev().find_map(|(i, mark)| {
        let dx = x - mark.x;
        let dy = y - mark.y;
        ((dx * dx + dy * dy).sqrt() <= mark.radius).then_some(i)
    })
}

/// Resolves pointer events against the current layout.
///
/// Stateless apart from the currently hovered mark, kept so hover callbacks
/// fire on target changes rather than on every pixel of motion. The hover
/// state must be reset whenever the layout is replaced — mark indices do
/// not survive a re-layout.
#[derive(Debug, Clone, Default)]
pub struct InteractionRouter {
    hovered: Option<usize>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Update the hovered target. Returns the target and whether it changed
    /// since the previous move.
    pub fn pointer_move(&mut self, layout: &Layout, x: f64, y: f64) -> (Option<usize>, bool) {
        let target = hit_test(layout, x, y);
        let changed = target != self.hovered;
        self.hovered = target;
        (target, changed)
    }

    /// Clear hover state. Returns whether something was hovered.
    pub fn pointer_leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Click resolution; leaves hover state untouched.
    pub fn click(&self, layout: &Layout, x: f64, y: f64) -> Option<usize> {
        hit_test(layout, x, y)
    }

    /// Drop hover state after the layout it indexed into was replaced.
    pub fn reset(&mut self) {
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Mark, MarkKind};

    fn layout() -> Layout {
        Layout {
            marks: vec![
                Mark {
                    x: 100.0,
                    y: 150.0,
                    radius: 7.0,
                    kind: MarkKind::Point { index: 0 },
                    label: None,
                },
                Mark {
                    x: 110.0,
                    y: 150.0,
                    radius: 12.0,
                    kind: MarkKind::Cluster {
                        members: vec![1, 2],
                    },
                    label: Some("2".to_string()),
                },
            ],
            ticks: Vec::new(),
        }
    }

    #[test]
    fn hits_within_radius_only() {
        let l = layout();
        assert_eq!(hit_test(&l, 300.0, 150.0), None);
        assert_eq!(hit_test(&l, 110.0, 150.0), Some(1));
        // 6px above the center, still inside the 12px cluster circle.
        assert_eq!(hit_test(&l, 110.0, 144.0), Some(1));
    }

    #[test]
    fn overlapping_cluster_wins_over_point() {
        let l = layout();
        // (104, 150) is inside both circles; the cluster sits on top.
        assert_eq!(hit_test(&l, 104.0, 150.0), Some(1));
        // Left edge of the point circle is outside the cluster.
        assert_eq!(hit_test(&l, 95.0, 150.0), Some(0));
    }

    #[test]
    fn pointer_move_reports_target_changes_once() {
        let l = layout();
        let mut router = InteractionRouter::new();
        let (target, changed) = router.pointer_move(&l, 110.0, 150.0);
        assert_eq!(target, Some(1));
        assert!(changed);

        let (target, changed) = router.pointer_move(&l, 111.0, 151.0);
        assert_eq!(target, Some(1));
        assert!(!changed, "same target must not re-fire");

        let (target, changed) = router.pointer_move(&l, 500.0, 150.0);
        assert_eq!(target, None);
        assert!(changed);
    }

    #[test]
    fn pointer_leave_clears_hover() {
        let l = layout();
        let mut router = InteractionRouter::new();
        router.pointer_move(&l, 110.0, 150.0);
        assert!(router.pointer_leave());
        assert_eq!(router.hovered(), None);
        assert!(!router.pointer_leave(), "second leave is a no-op");
    }

    #[test]
    fn click_does_not_disturb_hover() {
        let l = layout();
        let mut router = InteractionRouter::new();
        router.pointer_move(&l, 95.0, 150.0);
        assert_eq!(router.click(&l, 110.0, 150.0), Some(1));
        assert_eq!(router.hovered(), Some(0));
    }
}
