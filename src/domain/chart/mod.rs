pub mod rendering;
pub mod value_objects;
pub mod viewport;

pub use rendering::{DrawCommand, TextAlign, candle_index_at, render};
pub use value_objects::{CanvasSize, Color, PlotArea};
pub use viewport::{DragState, Viewport};
