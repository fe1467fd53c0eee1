pub mod commands;
pub mod theme;
pub mod tooltip;
pub mod types;

pub use commands::{RenderBatch, RenderCommand, TextAlign};
pub use theme::ThemeToken;
pub use tooltip::TooltipSignal;
pub use types::{Point, Rect, Viewport};
