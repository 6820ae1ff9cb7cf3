use std::ops::Range;

/// Smallest window the zoom operations will produce, when the series
/// allows it.
pub const MIN_VISIBLE: usize = 10;

const WHEEL_ZOOM_OUT: f64 = 1.1;
const WHEEL_ZOOM_IN: f64 = 0.9;
const BUTTON_ZOOM_IN: f64 = 0.8;
const BUTTON_ZOOM_OUT: f64 = 1.2;

/// Drag phase of the controller. An anchor without a drag (or the
/// reverse) is unrepresentable.
///
/// `window` is the visible size captured at pointer-down: sensitivity is
/// fixed for the duration of one continuous drag even if a wheel zoom
/// interleaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { anchor_x: f64, window: usize },
}

/// The visible index window over a series, plus the drag state machine.
///
/// Every transition is a total function: whatever the input, the result
/// satisfies `0 <= start < end <= len` and
/// `end - start in [min_visible, len]` (for non-empty series).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    start: usize,
    end: usize,
    len: usize,
    min_visible: usize,
    drag: DragState,
}

impl Viewport {
    /// Full-range viewport over a series of `len` points.
    pub fn new(len: usize) -> Self {
        Self {
            start: 0,
            end: len,
            len,
            min_visible: MIN_VISIBLE.min(len),
            drag: DragState::Idle,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn visible_len(&self) -> usize {
        self.end - self.start
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Begin (or re-anchor) a drag at pixel `x`.
    pub fn pointer_down(&mut self, x: f64) {
        self.drag = DragState::Dragging {
            anchor_x: x,
            window: self.visible_len(),
        };
    }

    /// Pan while dragging. The window size never changes here; proposals
    /// that would leave `[0, len]` are clamped to the boundary. The anchor
    /// follows the pointer on every move so the drag feels continuous.
    pub fn pointer_move(&mut self, x: f64, canvas_width: f64) {
        let DragState::Dragging { anchor_x, window } = self.drag else {
            return;
        };
        self.drag = DragState::Dragging { anchor_x: x, window };
        if canvas_width <= 0.0 {
            return;
        }

        let delta_px = x - anchor_x;
        let sensitivity = window as f64 / canvas_width;
        let index_shift = (delta_px * sensitivity) as i64;
        if index_shift == 0 {
            return;
        }

        let size = self.visible_len();
        let max_start = (self.len - size) as i64;
        let new_start = (self.start as i64 - index_shift).clamp(0, max_start) as usize;
        self.start = new_start;
        self.end = new_start + size;
    }

    /// Ends a drag; also the pointer-leave transition.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Wheel zoom: away from the user widens the window, toward narrows
    /// it. Valid in either drag state.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.apply_zoom(factor);
    }

    pub fn zoom_in(&mut self) {
        self.apply_zoom(BUTTON_ZOOM_IN);
    }

    pub fn zoom_out(&mut self) {
        self.apply_zoom(BUTTON_ZOOM_OUT);
    }

    /// Back to the full series.
    pub fn reset(&mut self) {
        self.start = 0;
        self.end = self.len;
    }

    /// Resize around the current center, clamped to the invariant bounds.
    fn apply_zoom(&mut self, factor: f64) {
        if self.len == 0 {
            return;
        }
        let size = self.visible_len();
        let new_size = ((size as f64 * factor).round() as usize).clamp(self.min_visible, self.len);
        let center = (self.start + self.end) as f64 / 2.0;
        let max_start = (self.len - new_size) as f64;
        let new_start = (center - new_size as f64 / 2.0).floor().clamp(0.0, max_start) as usize;
        self.start = new_start;
        self.end = new_start + new_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewport_spans_full_series() {
        let vp = Viewport::new(90);
        assert_eq!(vp.visible_range(), 0..90);
        assert!(!vp.is_dragging());
    }

    #[test]
    fn short_series_relaxes_min_visible() {
        let mut vp = Viewport::new(6);
        vp.zoom_in();
        assert_eq!(vp.visible_len(), 6);
    }

    #[test]
    fn zoom_on_empty_series_is_a_no_op() {
        let mut vp = Viewport::new(0);
        vp.zoom_in();
        vp.wheel(1.0);
        vp.reset();
        assert_eq!(vp.visible_range(), 0..0);
    }
}
