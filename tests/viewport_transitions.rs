use stock_chart_wasm::domain::chart::viewport::{DragState, Viewport};

const CANVAS_WIDTH: f64 = 800.0;

#[test]
fn pointer_down_enters_dragging_with_anchor() {
    let mut vp = Viewport::new(90);
    vp.pointer_down(120.0);
    assert!(vp.is_dragging());
    assert_eq!(
        vp.drag(),
        DragState::Dragging { anchor_x: 120.0, window: 90 }
    );
}

#[test]
fn pointer_up_and_leave_return_to_idle() {
    let mut vp = Viewport::new(90);
    vp.pointer_down(120.0);
    vp.pointer_up();
    assert!(!vp.is_dragging());
    assert_eq!(vp.drag(), DragState::Idle);
}

#[test]
fn move_without_drag_is_ignored() {
    let mut vp = Viewport::new(90);
    vp.pointer_move(300.0, CANVAS_WIDTH);
    assert_eq!(vp.visible_range(), 0..90);
    assert!(!vp.is_dragging());
}

#[test]
fn drag_shift_follows_sensitivity() {
    // Window of 72 over 90 points, canvas 800px wide:
    // sensitivity = 72 / 800 = 0.09, delta -80px => shift of 7 indices
    // toward newer data.
    let mut vp = Viewport::new(90);
    vp.zoom_in();
    assert_eq!(vp.visible_range(), 9..81);

    vp.pointer_down(400.0);
    vp.pointer_move(320.0, CANVAS_WIDTH);
    assert_eq!(vp.visible_range(), 16..88);
    assert_eq!(vp.visible_len(), 72);
}

#[test]
fn anchor_follows_pointer_on_every_move() {
    let mut vp = Viewport::new(90);
    vp.zoom_in();
    vp.pointer_down(400.0);
    // Sub-index move: no shift, but the anchor still updates
    vp.pointer_move(401.0, CANVAS_WIDTH);
    assert_eq!(vp.visible_range(), 9..81);
    assert_eq!(
        vp.drag(),
        DragState::Dragging { anchor_x: 401.0, window: 72 }
    );
}

#[test]
fn drag_never_resizes_the_window() {
    let mut vp = Viewport::new(200);
    vp.zoom_in();
    let size = vp.visible_len();
    vp.pointer_down(100.0);
    for x in [150.0, 600.0, 20.0, 790.0, 5.0] {
        vp.pointer_move(x, CANVAS_WIDTH);
        assert_eq!(vp.visible_len(), size);
    }
}

#[test]
fn drag_right_clamps_start_at_zero() {
    let mut vp = Viewport::new(90);
    vp.zoom_in();
    vp.pointer_down(100.0);
    vp.pointer_move(4000.0, CANVAS_WIDTH);
    assert_eq!(vp.visible_range(), 0..72);
}

#[test]
fn drag_left_clamps_end_at_length() {
    let mut vp = Viewport::new(90);
    vp.zoom_in();
    vp.pointer_down(4000.0);
    vp.pointer_move(100.0, CANVAS_WIDTH);
    assert_eq!(vp.visible_range(), 18..90);
}

#[test]
fn pointer_down_while_dragging_reanchors() {
    let mut vp = Viewport::new(90);
    vp.pointer_down(100.0);
    vp.pointer_down(500.0);
    assert_eq!(
        vp.drag(),
        DragState::Dragging { anchor_x: 500.0, window: 90 }
    );
}

#[test]
fn sensitivity_is_fixed_for_one_continuous_drag() {
    // A wheel zoom mid-drag changes the window size, but the drag keeps
    // the sensitivity captured at pointer-down.
    let mut vp = Viewport::new(200);
    vp.pointer_down(400.0);
    vp.wheel(-1.0); // zoom in to 180
    assert_eq!(vp.visible_len(), 180);
    assert_eq!(
        vp.drag(),
        DragState::Dragging { anchor_x: 400.0, window: 200 }
    );

    // shift computed with window=200: -16 * (200/800) = -4; with the
    // post-zoom window of 180 it would truncate to -3 instead
    vp.pointer_move(384.0, CANVAS_WIDTH);
    assert_eq!(vp.visible_len(), 180);
    assert_eq!(vp.visible_range(), 14..194);
}

#[test]
fn zero_width_canvas_only_reanchors() {
    let mut vp = Viewport::new(90);
    vp.pointer_down(100.0);
    vp.pointer_move(500.0, 0.0);
    assert_eq!(vp.visible_range(), 0..90);
    assert_eq!(
        vp.drag(),
        DragState::Dragging { anchor_x: 500.0, window: 90 }
    );
}
