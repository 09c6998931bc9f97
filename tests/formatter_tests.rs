use spectrum_chart::utils::number_formatter::{
    distance_label, exponential, fancy_round, precision_for_span, MAX_DIGITS,
};

fn decimals(label: &str) -> usize {
    label.split('.').nth(1).map_or(0, str::len)
}

#[test]
fn test_fancy_round_more_digits_as_span_shrinks() {
    let wide = fancy_round(100.0, 0.0, 50.0, 0);
    let narrow = fancy_round(1.0, 0.0, 0.5, 0);
    assert_eq!(wide, "50");
    assert_eq!(narrow, "0.50");
    assert!(decimals(&narrow) > decimals(&wide));

    let mut previous = 0;
    for span in [1000.0, 100.0, 10.0, 1.0, 0.1, 0.01] {
        let digits = decimals(&fancy_round(span, 0.0, span / 2.0, 0));
        assert!(digits >= previous, "span {span} lost precision");
        previous = digits;
    }
}

#[test]
fn test_fancy_round_extra_digits() {
    assert_eq!(fancy_round(10.0, 0.0, 5.0, 0), "5.0");
    assert_eq!(fancy_round(1.0, 0.0, 0.5, 1), "0.500");
}

#[test]
fn test_precision_degenerate_spans() {
    assert_eq!(precision_for_span(0.0, 0), MAX_DIGITS);
    assert_eq!(precision_for_span(-1.0, 0), MAX_DIGITS);
    assert_eq!(precision_for_span(f64::NAN, 0), MAX_DIGITS);
    assert_eq!(precision_for_span(1e-200, 0), MAX_DIGITS);
    assert_eq!(precision_for_span(1e6, 0), 0);

    let collapsed = fancy_round(5.0, 5.0, 5.0, 0);
    assert_eq!(decimals(&collapsed), MAX_DIGITS);
    assert!(!collapsed.contains("NaN"));
}

#[test]
fn test_distance_label() {
    // Two peaks 2.2 apart on a 1000 wide view
    assert_eq!(distance_label(1000.0, 0.0, 502.3 - 500.1), "2.200");
    assert_eq!(distance_label(10.0, 0.0, 0.05), "0.05000");
    // A zoomed view wins when it needs more digits than the value
    assert_eq!(distance_label(500.5, 500.0, 20.0), "20.000");
    assert_eq!(distance_label(1000.0, 0.0, 0.0), "0");
}

#[test]
fn test_exponential() {
    assert_eq!(exponential(12345.0, 2), "1.23e4");
    assert_eq!(exponential(2500.0, 2), "2.50e3");
}
