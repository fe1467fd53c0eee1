//! Layout, clustering, and zoom engine for a zoomable dot timeline.
//!
//! Timestamped points are mapped onto a horizontal pixel axis, and points
//! that visually collide at the current zoom level are merged into labeled
//! clusters that split apart again on zoom-in.
//!
//! ```text
//!   TimePoint[] ──▶ TimeScale ──▶ ZoomTransform ──▶ clustering ──▶ Layout ──▶ RenderCommand[]
//!     (data)       (time→px)     (visible window)    (DBSCAN)      (marks,      (external
//!                                                                  ticks)       renderer)
//! ```
//!
//! The engine is event-driven and single-threaded: every zoom, pan, resize,
//! or data change synchronously re-derives the pixel mapping, re-clusters
//! the visible geometry, and replaces the layout wholesale. Animated
//! transitions are caller-clocked through [`Timeline::advance`]; the engine
//! never pumps frames and never touches presentation state — drawing and
//! tooltip styling belong to whatever consumes the emitted commands and
//! [`dotline_protocol::TooltipSignal`].

pub mod axis;
pub mod cluster;
pub mod engine;
pub mod hit;
pub mod layout;
pub mod model;
pub mod render;
pub mod scale;
pub mod transform;
pub mod zoom;

pub use axis::Tick;
pub use cluster::{Cluster, ClusterParams, ClusterSet, POINT_RADIUS, ProjectedPoint};
pub use engine::Timeline;
pub use layout::{Layout, LayoutError, Mark, MarkKind};
pub use model::{TimeDomain, TimePoint};
pub use scale::TimeScale;
pub use transform::{ZoomExtent, ZoomTransform};
pub use zoom::{ZoomController, ZoomPhase};
