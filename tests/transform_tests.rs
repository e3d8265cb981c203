use party_pascal::core::{compute_transform, Transform, MIN_SCALE};

const HD: (u32, u32) = (1280, 720);

/// Real sizes from tiny to 4K-ish, including odd and portrait shapes
fn real_sizes() -> impl Iterator<Item = (u32, u32)> {
    let edges = [1, 2, 3, 7, 99, 319, 480, 567, 720, 800, 1000, 1079, 1280, 1366, 1920, 2561, 3840];
    edges
        .into_iter()
        .flat_map(move |w| edges.into_iter().map(move |h| (w, h)))
}

// ============================================================================
// Letterbox Properties
// ============================================================================

#[test]
fn test_scaled_canvas_always_inside_real_surface() {
    for (w, h) in real_sizes() {
        let t = compute_transform(HD, w, h);
        assert!(t.scale > 0.0, "{}x{}", w, h);
        assert!(t.offset_x >= 0 && t.offset_y >= 0, "{}x{}", w, h);
        assert!(t.offset_x as u32 + t.scaled_width <= w, "{}x{}", w, h);
        assert!(t.offset_y as u32 + t.scaled_height <= h, "{}x{}", w, h);
    }
}

#[test]
fn test_one_scale_for_both_axes() {
    for (w, h) in real_sizes() {
        let t = compute_transform(HD, w, h);
        let expected = (w as f64 / HD.0 as f64).min(h as f64 / HD.1 as f64);
        assert_eq!(t.scale, expected, "{}x{}", w, h);
        assert_eq!(t.scaled_width, (HD.0 as f64 * t.scale).floor() as u32);
        assert_eq!(t.scaled_height, (HD.1 as f64 * t.scale).floor() as u32);
    }
}

#[test]
fn test_canvas_is_centered() {
    for (w, h) in real_sizes() {
        let t = compute_transform(HD, w, h);
        let left = t.offset_x as u32;
        let right = w - t.scaled_width - left;
        assert!(right == left || right == left + 1, "{}x{}", w, h);
        let top = t.offset_y as u32;
        let bottom = h - t.scaled_height - top;
        assert!(bottom == top || bottom == top + 1, "{}x{}", w, h);
    }
}

#[test]
fn test_compute_is_idempotent() {
    for (w, h) in real_sizes() {
        assert_eq!(compute_transform(HD, w, h), compute_transform(HD, w, h));
    }
}

#[test]
fn test_identity_when_sizes_match() {
    assert_eq!(compute_transform(HD, 1280, 720), Transform::identity(1280, 720));
    assert_eq!(compute_transform((320, 200), 320, 200), Transform::identity(320, 200));
}

#[test]
fn test_virtual_round_trip_within_one_pixel() {
    for (w, h) in [(1920, 1080), (1000, 1000), (1366, 768), (800, 600), (3840, 1600)] {
        let t = compute_transform(HD, w, h);
        for vx in (0..1280).step_by(37) {
            for vy in (0..720).step_by(23) {
                let (rx, ry) = t.to_real(vx as f64, vy as f64);
                let (bx, by) = t.to_virtual(rx, ry);
                assert!((bx - vx).abs() <= 1 && (by - vy).abs() <= 1, "{}x{} ({}, {})", w, h, vx, vy);
            }
        }
    }
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_full_hd_scales_by_one_and_a_half() {
    let t = compute_transform(HD, 1920, 1080);
    assert_eq!(t.scale, 1.5);
    assert_eq!((t.offset_x, t.offset_y), (0, 0));
    assert_eq!((t.scaled_width, t.scaled_height), (1920, 1080));
}

#[test]
fn test_square_window_letterboxes() {
    let t = compute_transform(HD, 1000, 1000);
    assert_eq!(t.scale, 0.78125);
    assert_eq!((t.scaled_width, t.scaled_height), (1000, 562));
    assert_eq!((t.offset_x, t.offset_y), (0, 219));
}

#[test]
fn test_pointer_in_square_window() {
    let t = compute_transform(HD, 1000, 1000);
    assert_eq!(t.to_virtual(500.0, 500.0), (640, 359));
}

#[test]
fn test_pointer_in_bar_maps_off_canvas() {
    let t = compute_transform(HD, 1000, 1000);
    let (_, y) = t.to_virtual(500.0, 10.0);
    assert!(y < 0);
    let (_, y) = t.to_virtual(500.0, 995.0);
    assert!(y >= 720);
}

// ============================================================================
// Degenerate Sizes
// ============================================================================

#[test]
fn test_zero_sized_surface_uses_minimum_scale() {
    for (w, h) in [(0, 0), (0, 720), (1280, 0)] {
        let t = compute_transform(HD, w, h);
        assert_eq!(t.scale, MIN_SCALE);
        assert_eq!((t.scaled_width, t.scaled_height), (0, 0));
        assert!(t.offset_x >= 0 && t.offset_y >= 0);
    }
}

#[test]
fn test_one_pixel_surface() {
    let t = compute_transform(HD, 1, 1);
    assert!(t.scale > 0.0);
    assert!(t.scaled_width <= 1 && t.scaled_height <= 1);
}
