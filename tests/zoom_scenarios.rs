use quickcheck_macros::quickcheck;
use stock_chart_wasm::domain::chart::viewport::Viewport;

#[test]
fn wheel_out_at_full_range_is_unchanged() {
    // Scenario: 90 points fully visible; zooming out cannot exceed the
    // series, so clamp(round(90 * 1.1), 10, 90) leaves the range alone.
    let mut vp = Viewport::new(90);
    vp.wheel(1.0);
    assert_eq!(vp.visible_range(), 0..90);
}

#[test]
fn button_zoom_in_recenters() {
    // round(90 * 0.8) = 72, recentered around 45 => [9, 81)
    let mut vp = Viewport::new(90);
    vp.zoom_in();
    assert_eq!(vp.visible_range(), 9..81);
}

#[test]
fn wheel_in_narrows_and_wheel_out_widens() {
    let mut vp = Viewport::new(200);
    vp.wheel(-1.0);
    assert_eq!(vp.visible_len(), 180);
    vp.wheel(1.0);
    assert_eq!(vp.visible_len(), 198);
}

#[test]
fn repeated_zoom_in_floors_at_min_visible() {
    let mut vp = Viewport::new(90);
    for _ in 0..100 {
        vp.zoom_in();
    }
    assert_eq!(vp.visible_len(), 10);
    assert!(vp.start() < vp.end());
    assert!(vp.end() <= 90);
}

#[test]
fn repeated_zoom_out_caps_at_series_length() {
    let mut vp = Viewport::new(90);
    vp.zoom_in();
    for _ in 0..100 {
        vp.zoom_out();
    }
    assert_eq!(vp.visible_range(), 0..90);
}

#[test]
fn reset_restores_full_range() {
    let mut vp = Viewport::new(150);
    vp.zoom_in();
    vp.zoom_in();
    vp.pointer_down(10.0);
    vp.pointer_move(700.0, 800.0);
    vp.reset();
    assert_eq!(vp.visible_range(), 0..150);
}

#[quickcheck]
fn invariant_holds_after_any_operation_sequence(len: u8, ops: Vec<(u8, i16)>) -> bool {
    let len = len as usize;
    let mut vp = Viewport::new(len);
    for (op, arg) in ops {
        match op % 7 {
            0 => vp.pointer_down(f64::from(arg)),
            1 => vp.pointer_move(f64::from(arg), 800.0),
            2 => vp.pointer_up(),
            3 => vp.wheel(f64::from(arg)),
            4 => vp.zoom_in(),
            5 => vp.zoom_out(),
            _ => vp.reset(),
        }
        if len == 0 {
            if vp.start() != 0 || vp.end() != 0 {
                return false;
            }
            continue;
        }
        let size = vp.end() - vp.start();
        if vp.start() >= vp.end() || vp.end() > len {
            return false;
        }
        if size < 10.min(len) || size > len {
            return false;
        }
    }
    true
}
