/// Value Object - RGBA color, converted to CSS only at the canvas edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }

    /// Chart palette
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BACKGROUND: Color = Color { r: 0.102, g: 0.102, b: 0.102, a: 1.0 }; // #1a1a1a
    pub const GRID: Color = Color { r: 0.173, g: 0.184, b: 0.2, a: 1.0 };
    pub const FRAME: Color = Color { r: 0.29, g: 0.365, b: 0.45, a: 1.0 }; // #4a5d73
    pub const TEXT: Color = Color { r: 0.667, g: 0.667, b: 0.667, a: 1.0 }; // #aaaaaa
    pub const WICK: Color = Color { r: 0.533, g: 0.533, b: 0.533, a: 1.0 }; // #888888
    pub const UP: Color = Color { r: 0.0, g: 1.0, b: 0.533, a: 1.0 }; // #00ff88
    pub const DOWN: Color = Color { r: 1.0, g: 0.267, b: 0.267, a: 1.0 }; // #ff4444
}

/// Value Object - rendered surface dimensions in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Value Object - the candle plot rectangle inside the canvas, after
/// reserving room for the price axis and the date labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub const MARGIN_LEFT: f64 = 8.0;
    pub const MARGIN_TOP: f64 = 12.0;
    pub const MARGIN_RIGHT: f64 = 64.0;
    pub const MARGIN_BOTTOM: f64 = 22.0;

    /// Derived from the live surface size on every draw; nothing here is
    /// cached between renders.
    pub fn from_canvas(canvas: CanvasSize) -> Self {
        Self {
            x: Self::MARGIN_LEFT,
            y: Self::MARGIN_TOP,
            width: (canvas.width - Self::MARGIN_LEFT - Self::MARGIN_RIGHT).max(0.0),
            height: (canvas.height - Self::MARGIN_TOP - Self::MARGIN_BOTTOM).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Price -> pixel scale, inverted so larger prices sit higher. A
    /// degenerate range collapses to the vertical middle instead of
    /// dividing by zero.
    pub fn price_to_y(&self, price: f64, min_price: f64, max_price: f64) -> f64 {
        let range = max_price - min_price;
        if range <= 0.0 {
            return self.y + self.height / 2.0;
        }
        self.y + (max_price - price) / range * self.height
    }
}
