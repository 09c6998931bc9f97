use spectrum_chart::data_types::{Viewport, ViewportBounds};

fn bounds() -> ViewportBounds {
    ViewportBounds::new(1000.0, 10_000.0, 5_000.0)
}

#[test]
fn test_initial_window() {
    let vp = Viewport::new(bounds());
    assert_eq!(vp.min_mz, 0.0);
    assert_eq!(vp.max_mz, 1000.0);
    assert_eq!(vp.max_intensity, 10_000.0);
    assert!(!vp.zoomed);
}

#[test]
fn test_zoom_sets_window_and_clamps_min() {
    let mut vp = Viewport::new(bounds());
    let effect = vp.zoom(-5.0, 100.0, 50.0).expect("valid zoom");
    assert_eq!((vp.min_mz, vp.max_mz, vp.max_intensity), (0.0, 100.0, 50.0));
    assert!(vp.zoomed);
    assert!(effect.labels_stale);
}

#[test]
fn test_labels_only_stale_when_intensity_changes() {
    let mut vp = Viewport::new(bounds());
    let first = vp.zoom(100.0, 200.0, 10_000.0).expect("valid zoom");
    assert!(!first.labels_stale);
    let second = vp.zoom(120.0, 180.0, 4_000.0).expect("valid zoom");
    assert!(second.labels_stale);
    let third = vp.zoom(130.0, 170.0, 4_000.0).expect("valid zoom");
    assert!(!third.labels_stale);
}

#[test]
fn test_degenerate_zoom_is_discarded() {
    let mut vp = Viewport::new(bounds());
    vp.zoom(100.0, 200.0, 500.0);
    let before = vp.clone();

    assert!(vp.zoom(200.0, 100.0, 500.0).is_none());
    assert!(vp.zoom(150.0, 150.0, 500.0).is_none());
    assert!(vp.zoom(f64::NAN, 150.0, 500.0).is_none());
    assert!(vp.zoom(-10.0, -1.0, 500.0).is_none());
    assert_eq!(vp, before);
}

#[test]
fn test_non_positive_intensity_keeps_previous() {
    let mut vp = Viewport::new(bounds());
    vp.zoom(100.0, 200.0, 0.0);
    assert_eq!(vp.max_intensity, 10_000.0);
    assert_eq!((vp.min_mz, vp.max_mz), (100.0, 200.0));
}

#[test]
fn test_reset_is_idempotent() {
    let fresh = Viewport::new(bounds());
    let mut vp = fresh.clone();
    vp.zoom(100.0, 200.0, 500.0);
    vp.zoom(120.0, 130.0, 50.0);
    let effect = vp.reset();
    assert!(effect.labels_stale);
    assert_eq!(vp, fresh);
    vp.reset();
    assert_eq!(vp, fresh);
}

#[test]
fn test_show_unassigned_swaps_canonical_bounds() {
    let mut vp = Viewport::new(bounds());
    assert!(vp.set_show_unassigned(false));
    assert_eq!(vp.max_intensity, 5_000.0);
    assert!(!vp.set_show_unassigned(false));
    assert!(vp.set_show_unassigned(true));
    assert_eq!(vp.max_intensity, 10_000.0);
}

#[test]
fn test_show_unassigned_keeps_manual_intensity() {
    let mut vp = Viewport::new(bounds());
    vp.zoom(0.0, 1000.0, 7_000.0);
    assert!(!vp.set_show_unassigned(false));
    assert_eq!(vp.max_intensity, 7_000.0);
}

#[test]
fn test_bounds_validation() {
    assert!(bounds().is_valid());
    assert!(!ViewportBounds::new(0.0, 1.0, 1.0).is_valid());
    assert!(!ViewportBounds::new(100.0, f64::INFINITY, 1.0).is_valid());
    assert!(!ViewportBounds::new(100.0, 1.0, -1.0).is_valid());
}
