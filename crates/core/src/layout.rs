use dotline_protocol::Viewport;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axis::{self, Tick};
use crate::cluster::{self, ClusterParams, ProjectedPoint};
use crate::scale::TimeScale;
use crate::transform::ZoomTransform;

/// What a mark on the timeline row represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkKind {
    /// A lone point; `index` into the caller's point slice.
    Point { index: usize },
    /// A merged group of two or more points, ascending input order.
    Cluster { members: Vec<usize> },
}

impl MarkKind {
    /// The point indices this mark resolves to for interaction routing.
    pub fn members(&self) -> &[usize] {
        match self {
            Self::Point { index } => std::slice::from_ref(index),
            Self::Cluster { members } => members,
        }
    }
}

/// One drawable, hit-testable circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub kind: MarkKind,
    /// Member count for clusters, `None` for single points.
    pub label: Option<String>,
}

/// Geometry for one render pass: marks plus axis ticks.
///
/// Replaced wholesale on every domain, size, or transform change — never
/// mutated in place, so geometry and clustering cannot drift apart within
/// a pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub marks: Vec<Mark>,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The transform maps the pixel range onto a NaN/infinite time window:
    /// the transform or domain is corrupt, and rescaling through it would
    /// silently collapse every point onto one column.
    #[error("visible window is not finite under transform k={k}, x={x}")]
    NonFiniteWindow { k: f64, x: f64 },
    /// A projected pixel coordinate came out NaN or infinite: the domain or
    /// range is corrupt, and continuing would draw silently wrong geometry.
    #[error("projected x for point {index} is not finite")]
    NonFinitePosition { index: usize },
}

/// Vertical position of the single timeline row.
pub fn row_y(viewport: &Viewport) -> f64 {
    viewport.height / 2.0
}

/// Project, cluster, and lay out the points as seen through `transform`.
///
/// Pure: identical inputs produce identical layouts. Singleton marks come
/// first and cluster marks after, so clusters draw — and hit-test — above
/// the points they absorb.
pub fn compute_layout(
    ts_ms: &[f64],
    base: &TimeScale,
    transform: ZoomTransform,
    viewport: &Viewport,
    params: &ClusterParams,
) -> Result<Layout, LayoutError> {
    let (r0, r1) = base.range();
    let window = (
        base.invert_ms(transform.unapply(r0)),
        base.invert_ms(transform.unapply(r1)),
    );
    if !window.0.is_finite() || !window.1.is_finite() {
        return Err(LayoutError::NonFiniteWindow {
            k: transform.k,
            x: transform.x,
        });
    }

    let visible = base.rescaled(transform);
    let y = row_y(viewport);

    let mut projected = Vec::with_capacity(ts_ms.len());
    for (index, &ms) in ts_ms.iter().enumerate() {
        let x = visible.project_ms(ms);
        if !x.is_finite() {
            return Err(LayoutError::NonFinitePosition { index });
        }
        projected.push(ProjectedPoint { index, x, y });
    }

    let groups = cluster::cluster(&projected, params);

    let mut marks = Vec::with_capacity(groups.singletons.len() + groups.clusters.len());
    for &index in &groups.singletons {
        marks.push(Mark {
            x: projected[index].x,
            y,
            radius: params.point_radius,
            kind: MarkKind::Point { index },
            label: None,
        });
    }
    for c in groups.clusters {
        marks.push(Mark {
            x: c.center_x,
            y: c.center_y,
            radius: c.radius,
            label: Some(c.members.len().to_string()),
            kind: MarkKind::Cluster { members: c.members },
        });
    }

    let ticks = axis::ticks(&visible, viewport.width);
    Ok(Layout { marks, ticks })
}
