use super::value_objects::{CanvasSize, Color, PlotArea};
use super::viewport::Viewport;
use crate::domain::market_data::{DailySeries, SourceKind};
use crate::time_utils::{format_date_label, format_price};

pub const LABEL_FONT: &str = "12px Arial";
pub const OVERLAY_FONT: &str = "16px Arial";

const PRICE_GRID_LINES: usize = 5;
const DATE_LABEL_TARGET: usize = 8;
const BODY_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// One deterministic draw instruction. The pipeline below emits these in
/// paint order; the canvas executor replays them without interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        line_width: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        color: Color,
        align: TextAlign,
        font: &'static str,
    },
}

/// Pure rendering pipeline: visible slice + surface geometry in, draw
/// commands out. Re-evaluated in full on every viewport or series change;
/// no pixel position survives from one call to the next.
pub fn render(
    series: &DailySeries,
    viewport: &Viewport,
    canvas: CanvasSize,
    source: SourceKind,
) -> Vec<DrawCommand> {
    let slice = series.slice(viewport.start(), viewport.end());
    if slice.is_empty() {
        return Vec::new();
    }
    let plot = PlotArea::from_canvas(canvas);
    if plot.width <= 0.0 || plot.height <= 0.0 {
        return Vec::new();
    }

    let Some((min_price, max_price)) = series.price_bounds(viewport.start(), viewport.end()) else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(slice.len() * 2 + 24);

    // Background first, everything else layers on top
    commands.push(DrawCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: canvas.width,
        height: canvas.height,
        color: Color::BACKGROUND,
    });

    push_price_grid(&mut commands, &plot, canvas, min_price, max_price);

    let slot_width = plot.width / slice.len() as f64;
    push_date_grid(&mut commands, &plot, slice, slot_width);
    push_candles(&mut commands, &plot, slice, slot_width, min_price, max_price);

    commands.push(DrawCommand::StrokeRect {
        x: plot.x,
        y: plot.y,
        width: plot.width,
        height: plot.height,
        color: Color::FRAME,
        line_width: 1.0,
    });

    push_overlay(&mut commands, &plot, slice, source);

    commands
}

/// Map a pointer x position back to the series index under it.
pub fn candle_index_at(x: f64, viewport: &Viewport, canvas: CanvasSize) -> Option<usize> {
    let visible = viewport.visible_len();
    if visible == 0 {
        return None;
    }
    let plot = PlotArea::from_canvas(canvas);
    if plot.width <= 0.0 || x < plot.x || x >= plot.right() {
        return None;
    }
    let slot_width = plot.width / visible as f64;
    let offset = ((x - plot.x) / slot_width) as usize;
    let index = viewport.start() + offset;
    (index < viewport.end()).then_some(index)
}

fn push_price_grid(
    commands: &mut Vec<DrawCommand>,
    plot: &PlotArea,
    canvas: CanvasSize,
    min_price: f64,
    max_price: f64,
) {
    let range = max_price - min_price;
    for i in 0..PRICE_GRID_LINES {
        let price = min_price + range * i as f64 / (PRICE_GRID_LINES - 1) as f64;
        let y = plot.price_to_y(price, min_price, max_price);
        commands.push(DrawCommand::Line {
            x1: plot.x,
            y1: y,
            x2: plot.right(),
            y2: y,
            color: Color::GRID,
            line_width: 1.0,
        });
        commands.push(DrawCommand::Text {
            text: format_price(price),
            x: canvas.width - 6.0,
            y: y + 4.0,
            color: Color::TEXT,
            align: TextAlign::Right,
            font: LABEL_FONT,
        });
    }
}

fn push_date_grid(
    commands: &mut Vec<DrawCommand>,
    plot: &PlotArea,
    slice: &[crate::domain::market_data::OhlcvPoint],
    slot_width: f64,
) {
    let stride = (slice.len() / DATE_LABEL_TARGET).max(1);
    for (i, point) in slice.iter().enumerate().step_by(stride) {
        let x = plot.x + (i as f64 + 0.5) * slot_width;
        commands.push(DrawCommand::Line {
            x1: x,
            y1: plot.y,
            x2: x,
            y2: plot.bottom(),
            color: Color::GRID,
            line_width: 1.0,
        });
        commands.push(DrawCommand::Text {
            text: format_date_label(point.date),
            x,
            y: plot.bottom() + 15.0,
            color: Color::TEXT,
            align: TextAlign::Center,
            font: LABEL_FONT,
        });
    }
}

fn push_candles(
    commands: &mut Vec<DrawCommand>,
    plot: &PlotArea,
    slice: &[crate::domain::market_data::OhlcvPoint],
    slot_width: f64,
    min_price: f64,
    max_price: f64,
) {
    let body_width = (slot_width * BODY_WIDTH_RATIO).max(1.0);
    for (i, point) in slice.iter().enumerate() {
        let x = plot.x + (i as f64 + 0.5) * slot_width;
        let high_y = plot.price_to_y(point.high.value(), min_price, max_price);
        let low_y = plot.price_to_y(point.low.value(), min_price, max_price);
        let open_y = plot.price_to_y(point.open.value(), min_price, max_price);
        let close_y = plot.price_to_y(point.close.value(), min_price, max_price);

        commands.push(DrawCommand::Line {
            x1: x,
            y1: high_y,
            x2: x,
            y2: low_y,
            color: Color::WICK,
            line_width: 1.0,
        });

        let color = if point.close > point.open { Color::UP } else { Color::DOWN };
        let body_top = open_y.min(close_y);
        // Doji bodies still get one visible pixel
        let body_height = (open_y - close_y).abs().max(1.0);
        commands.push(DrawCommand::FillRect {
            x: x - body_width / 2.0,
            y: body_top,
            width: body_width,
            height: body_height,
            color,
        });
    }
}

fn push_overlay(
    commands: &mut Vec<DrawCommand>,
    plot: &PlotArea,
    slice: &[crate::domain::market_data::OhlcvPoint],
    source: SourceKind,
) {
    let Some(last) = slice.last() else {
        return;
    };

    commands.push(DrawCommand::Text {
        text: format_price(last.close.value()),
        x: plot.x + 10.0,
        y: plot.y + 22.0,
        color: Color::WHITE,
        align: TextAlign::Left,
        font: OVERLAY_FONT,
    });

    if slice.len() >= 2 {
        let prior = &slice[slice.len() - 2];
        let (delta, pct) = last.change_from(prior);
        let color = if delta >= 0.0 { Color::UP } else { Color::DOWN };
        commands.push(DrawCommand::Text {
            text: format!("{delta:+.2} ({pct:+.2}%)"),
            x: plot.x + 10.0,
            y: plot.y + 40.0,
            color,
            align: TextAlign::Left,
            font: LABEL_FONT,
        });
    }

    commands.push(DrawCommand::Text {
        text: source.badge().to_string(),
        x: plot.right() - 8.0,
        y: plot.y + 18.0,
        color: Color::TEXT,
        align: TextAlign::Right,
        font: LABEL_FONT,
    });
}
