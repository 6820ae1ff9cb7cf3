use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::chart::rendering::DrawCommand;
use crate::domain::chart::value_objects::CanvasSize;
use crate::domain::errors::RenderError;
use crate::domain::logging::{LogComponent, get_logger};

/// Canvas 2D executor for the rendering pipeline's command list. This is
/// the only impure half of drawing: the pipeline decides, this replays.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Look the canvas up by element id and grab its 2d context.
    pub fn attach(canvas_id: &str) -> Result<Self, RenderError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(RenderError::ContextUnavailable)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| RenderError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::CanvasNotFound(canvas_id.to_string()))?;
        let context = canvas
            .get_context("2d")
            .map_err(|_| RenderError::ContextUnavailable)?
            .ok_or(RenderError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::ContextUnavailable)?;
        Ok(Self { canvas, context })
    }

    /// Resync the backing store with the element's current CSS size and
    /// report it. Called before every replay: the surface may have been
    /// resized since the last draw.
    pub fn surface_size(&self) -> CanvasSize {
        let width = self.canvas.client_width().max(1) as u32;
        let height = self.canvas.client_height().max(1) as u32;
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
        CanvasSize::new(f64::from(width), f64::from(height))
    }

    pub fn replay(&self, commands: &[DrawCommand]) -> Result<(), RenderError> {
        let size = CanvasSize::new(
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.context.clear_rect(0.0, 0.0, size.width, size.height);

        for command in commands {
            match command {
                DrawCommand::FillRect { x, y, width, height, color } => {
                    self.context.set_fill_style(&JsValue::from(color.to_css()));
                    self.context.fill_rect(*x, *y, *width, *height);
                }
                DrawCommand::StrokeRect { x, y, width, height, color, line_width } => {
                    self.context.set_stroke_style(&JsValue::from(color.to_css()));
                    self.context.set_line_width(*line_width);
                    self.context.stroke_rect(*x, *y, *width, *height);
                }
                DrawCommand::Line { x1, y1, x2, y2, color, line_width } => {
                    self.context.set_stroke_style(&JsValue::from(color.to_css()));
                    self.context.set_line_width(*line_width);
                    self.context.begin_path();
                    self.context.move_to(*x1, *y1);
                    self.context.line_to(*x2, *y2);
                    self.context.stroke();
                }
                DrawCommand::Text { text, x, y, color, align, font } => {
                    self.context.set_fill_style(&JsValue::from(color.to_css()));
                    self.context.set_font(font);
                    self.context.set_text_align(align.as_css());
                    self.context
                        .fill_text(text, *x, *y)
                        .map_err(|e| RenderError::Draw(format!("{e:?}")))?;
                }
            }
        }

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("replayed {} draw commands", commands.len()),
        );

        Ok(())
    }
}
