use serde::{Deserialize, Serialize};

/// Tooltip state emitted by the engine's interaction router.
///
/// The engine never touches presentation state; it only describes what the
/// tooltip should show and where. The rendering surface owns styling and
/// fade semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipSignal {
    pub visible: bool,
    /// Formatter output for the hovered point(s). Empty when hidden.
    pub content: String,
    /// Anchor position in viewport pixels, already offset below the pointer.
    pub x: f64,
    pub y: f64,
}

impl TooltipSignal {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            content: String::new(),
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn shown(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            visible: true,
            content: content.into(),
            x,
            y,
        }
    }
}

impl Default for TooltipSignal {
    fn default() -> Self {
        Self::hidden()
    }
}
