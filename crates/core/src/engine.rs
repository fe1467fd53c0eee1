use dotline_protocol::{RenderBatch, RenderCommand, TooltipSignal, Viewport};

use crate::cluster::ClusterParams;
use crate::hit::InteractionRouter;
use crate::layout::{self, Layout, LayoutError};
use crate::model::{TimeDomain, TimePoint};
use crate::render;
use crate::scale::TimeScale;
use crate::transform::{ZoomExtent, ZoomTransform};
use crate::zoom::{ZoomController, ZoomPhase};

/// Vertical offset between the pointer and the tooltip anchor.
const TOOLTIP_OFFSET_Y: f64 = 50.0;

pub type SelectHandler<P> = Box<dyn FnMut(&[&TimePoint<P>])>;
pub type TooltipFormatter<P> = Box<dyn Fn(&[&TimePoint<P>]) -> String>;

/// The assembled engine: scale mapper, zoom controller, clustering, and
/// interaction routing behind explicit entry points.
///
/// The composing layer forwards resize, data, and pointer events, drives
/// animation through [`Timeline::advance`] from its own frame clock, and
/// reads geometry back as a [`Layout`] or flattened render commands.
/// Tooltip state comes out as an emitted [`TooltipSignal`]; the engine
/// never touches presentation state.
pub struct Timeline<P> {
    points: Vec<TimePoint<P>>,
    ts_ms: Vec<f64>,
    viewport: Viewport,
    params: ClusterParams,
    base: Option<TimeScale>,
    zoom: ZoomController,
    layout: Layout,
    router: InteractionRouter,
    tooltip: TooltipSignal,
    on_click: Option<SelectHandler<P>>,
    on_hover: Option<SelectHandler<P>>,
    format_tooltip: TooltipFormatter<P>,
}

impl<P: 'static> Timeline<P> {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            points: Vec::new(),
            ts_ms: Vec::new(),
            viewport: Viewport::new(width, height),
            params: ClusterParams::default(),
            base: None,
            zoom: ZoomController::new(ZoomExtent { min: 1.0, max: 1.0 }, width),
            layout: Layout::default(),
            router: InteractionRouter::new(),
            tooltip: TooltipSignal::hidden(),
            on_click: None,
            on_hover: None,
            format_tooltip: Box::new(default_tooltip),
        }
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.params = ClusterParams::new(radius);
        self
    }

    pub fn with_on_click(mut self, handler: impl FnMut(&[&TimePoint<P>]) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn with_on_hover(mut self, handler: impl FnMut(&[&TimePoint<P>]) + 'static) -> Self {
        self.on_hover = Some(Box::new(handler));
        self
    }

    pub fn with_tooltip_formatter(
        mut self,
        format: impl Fn(&[&TimePoint<P>]) -> String + 'static,
    ) -> Self {
        self.format_tooltip = Box::new(format);
        self
    }

    /// Replace the data set wholesale and animate back to the fitted view.
    pub fn set_data(&mut self, points: Vec<TimePoint<P>>) -> Result<(), LayoutError> {
        self.points = points;
        self.ts_ms = self.points.iter().map(TimePoint::ts_ms).collect();
        self.reinitialize()
    }

    /// New container size from resize observation. Rebuilds the range
    /// mapping and replays the fit transition, exactly as a fresh mount
    /// would.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        self.viewport = Viewport::new(width, height);
        self.reinitialize()
    }

    fn reinitialize(&mut self) -> Result<(), LayoutError> {
        let domain = TimeDomain::from_instants(self.points.iter().map(|p| p.ts));
        self.base = domain.map(|d| TimeScale::new(d, (0.0, self.viewport.width)));
        self.zoom = match (&self.base, domain) {
            (Some(scale), Some(d)) => {
                ZoomController::initializing(scale, ZoomExtent::for_domain(&d))
            }
            _ => ZoomController::new(ZoomExtent { min: 1.0, max: 1.0 }, self.viewport.width),
        };
        self.relayout()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tooltip(&self) -> &TooltipSignal {
        &self.tooltip
    }

    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    pub fn phase(&self) -> ZoomPhase {
        self.zoom.phase()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Flatten the current layout into render commands for the rendering
    /// surface.
    pub fn render(&self) -> Vec<RenderCommand> {
        render::render_layout(&self.layout, &self.viewport)
    }

    /// One full pass for the rendering surface: commands plus tooltip.
    pub fn render_batch(&self) -> RenderBatch {
        RenderBatch {
            commands: self.render(),
            tooltip: self.tooltip.clone(),
        }
    }

    /// Fire-and-forget animated zoom; geometry updates on `advance` ticks.
    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    /// Gesture-layer transform (wheel or drag), applied immediately. The
    /// candidate is normalized before use, so corrupt gesture scales never
    /// reach the layout.
    pub fn set_transform(&mut self, candidate: ZoomTransform) -> Result<(), LayoutError> {
        self.zoom.set_transform(candidate);
        self.relayout()
    }

    /// Drive animated transitions from the caller's frame clock. Returns
    /// whether the caller should schedule another frame.
    pub fn advance(&mut self, now_ms: f64) -> Result<bool, LayoutError> {
        if self.zoom.advance(now_ms) {
            self.relayout()?;
        }
        Ok(self.zoom.is_animating())
    }

    /// Pointer motion over the viewport. Resolves the hovered mark to its
    /// member points, fires the hover callback when the target changes, and
    /// returns the tooltip signal for this position.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> &TooltipSignal {
        let (target, changed) = self.router.pointer_move(&self.layout, x, y);
        match target {
            Some(mark) => {
                let refs = member_refs(&self.points, self.layout.marks[mark].kind.members());
                if changed && let Some(on_hover) = self.on_hover.as_mut() {
                    on_hover(&refs);
                }
                let content = (self.format_tooltip)(&refs);
                self.tooltip = TooltipSignal::shown(content, x, y + TOOLTIP_OFFSET_Y);
            }
            None => {
                self.tooltip = TooltipSignal::hidden();
            }
        }
        &self.tooltip
    }

    /// Pointer left the viewport: hide the tooltip and clear hover state.
    pub fn pointer_leave(&mut self) -> &TooltipSignal {
        self.router.pointer_leave();
        self.tooltip = TooltipSignal::hidden();
        &self.tooltip
    }

    /// Click resolution: a singleton yields its one point, a cluster all of
    /// its members.
    pub fn click(&mut self, x: f64, y: f64) {
        if let Some(mark) = self.router.click(&self.layout, x, y) {
            let refs = member_refs(&self.points, self.layout.marks[mark].kind.members());
            if let Some(on_click) = self.on_click.as_mut() {
                on_click(&refs);
            }
        }
    }

    fn relayout(&mut self) -> Result<(), LayoutError> {
        self.router.reset();
        let Some(base) = &self.base else {
            self.layout = Layout::default();
            return Ok(());
        };
        match layout::compute_layout(
            &self.ts_ms,
            base,
            self.zoom.transform(),
            &self.viewport,
            &self.params,
        ) {
            Ok(next) => {
                self.layout = next;
                Ok(())
            }
            Err(err) => {
                // Never leave stale geometry behind after a corrupt pass.
                self.layout = Layout::default();
                Err(err)
            }
        }
    }
}

fn member_refs<'a, P>(points: &'a [TimePoint<P>], members: &[usize]) -> Vec<&'a TimePoint<P>> {
    members.iter().filter_map(|&i| points.get(i)).collect()
}

fn default_tooltip<P>(points: &[&TimePoint<P>]) -> String {
    match points {
        [single] => single.ts.format("%Y-%m-%d %H:%M").to_string(),
        many => format!("{} points", many.len()),
    }
}
