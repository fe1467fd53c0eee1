use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::tooltip::TooltipSignal;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The engine emits a `Vec<RenderCommand>` per layout pass. Renderers consume
/// the list sequentially — each command carries all the data it needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled circle. `mark_id` links the shape back to the layout
    /// mark it was emitted for, so renderers can wire up hit regions.
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
        mark_id: Option<u64>,
    },

    /// Draw a filled rectangle (cluster count badges).
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        mark_id: Option<u64>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Begin a logical group (axis, points, clusters). Renderers may use
    /// this for batching or layer separation.
    BeginGroup {
        id: String,
        label: Option<String>,
    },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Everything the rendering surface consumes for one pass: the command
/// stream plus the current tooltip state. Serializable, so a pass can cross
/// a process or WASM boundary as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderBatch {
    pub commands: Vec<RenderCommand>,
    pub tooltip: TooltipSignal,
}
