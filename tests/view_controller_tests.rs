use spectrum_chart::view_controller::ViewController;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_pan_range() {
    // 1000 units of scroll over a span of 100 move the window by 10
    let (min, max) = ViewController::pan_range(100.0, 200.0, 1000.0, 1e-4);
    assert!(approx(min, 110.0));
    assert!(approx(max, 210.0));
}

#[test]
fn test_pan_range_stops_at_zero() {
    let (min, max) = ViewController::pan_range(5.0, 105.0, -10_000.0, 1e-4);
    assert_eq!(min, 0.0);
    assert_eq!(max, 100.0);
}

#[test]
fn test_zoom_range_at_center_is_symmetric() {
    let (min, max) = ViewController::zoom_range_at(100.0, 200.0, 0.5, -100.0, 5e-4);
    assert!(approx(min, 102.5));
    assert!(approx(max, 197.5));
    assert!(approx(min - 100.0, 200.0 - max));

    let (min, max) = ViewController::zoom_range_at(100.0, 200.0, 0.5, 100.0, 5e-4);
    assert!(approx(min, 97.5));
    assert!(approx(max, 202.5));
}

#[test]
fn test_zoom_range_at_edge_keeps_pivot() {
    let (min, max) = ViewController::zoom_range_at(100.0, 200.0, 0.0, -100.0, 5e-4);
    assert_eq!(min, 100.0);
    assert!(approx(max, 195.0));
}

#[test]
fn test_zoom_range_at_never_negative() {
    let (min, max) = ViewController::zoom_range_at(0.0, 100.0, 0.5, 100.0, 5e-4);
    assert_eq!(min, 0.0);
    assert!(approx(max, 102.5));
}

#[test]
fn test_zoom_centered() {
    let (min, max) = ViewController::zoom_centered(0.0, 100.0, 0.05, true);
    assert!(approx(min, 2.5));
    assert!(approx(max, 97.5));

    let (min, max) = ViewController::zoom_centered(0.0, 100.0, 0.05, false);
    assert_eq!(min, 0.0);
    assert!(approx(max, 102.5));
}

#[test]
fn test_intensity_factor() {
    assert!(approx(ViewController::compute_intensity_factor(100.0, 5e-4, 0.05), 1.05));
    assert!(approx(ViewController::compute_intensity_factor(-100.0, 5e-4, 0.05), 0.95));
    // Bounded away from zero
    assert_eq!(ViewController::compute_intensity_factor(-10_000.0, 5e-4, 0.05), 0.05);
}

#[test]
fn test_value_below_top() {
    assert_eq!(ViewController::value_below_top(100.0, 400.0, 10_000.0), 7_500.0);
    assert_eq!(ViewController::value_below_top(0.0, 400.0, 80.0), 80.0);
    // Offsets past the edges read the edge values
    assert_eq!(ViewController::value_below_top(500.0, 400.0, 80.0), 0.0);
    assert_eq!(ViewController::value_below_top(-5.0, 400.0, 80.0), 80.0);
    assert_eq!(ViewController::value_below_top(50.0, 0.0, 80.0), 80.0);
}

#[test]
fn test_selection_fractions() {
    assert_eq!(ViewController::selection_fractions(300.0, 100.0, 800.0), (0.125, 0.375));
    assert_eq!(ViewController::selection_fractions(-10.0, 900.0, 800.0), (0.0, 1.0));
    assert_eq!(ViewController::selection_fractions(10.0, 20.0, 0.0), (0.0, 0.0));
}
