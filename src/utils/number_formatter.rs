/// Upper bound on the number of fractional digits any label can carry.
pub const MAX_DIGITS: usize = 100;

/// Number of fractional digits needed to tell values apart inside a visible span.
///
/// A span of 100 needs no decimals, a span of 1 needs two, a span of 0.01 needs four.
/// Collapsed or invalid spans get the maximum precision.
pub fn precision_for_span(span: f64, extra_digits: u32) -> usize {
    if span.is_nan() || span <= 0.0 {
        return MAX_DIGITS;
    }
    clamp_digits(-span.log10() + 2.0 + extra_digits as f64)
}

/// Rounds `value` to the precision dictated by the span `[min, max]`.
pub fn fancy_round(max: f64, min: f64, value: f64, extra_digits: u32) -> String {
    let digits = precision_for_span(max - min, extra_digits);
    format!("{:.*}", digits, value)
}

/// Formats a measured distance so that it stays distinguishable from zero even
/// when the surrounding view is zoomed far out.
pub fn distance_label(max: f64, min: f64, value: f64) -> String {
    let zoom_digits = precision_for_span(max - min, 0);
    let digits = if value > 0.0 && value.is_finite() {
        zoom_digits.max(clamp_digits(-value.log10() + 3.0))
    } else {
        zoom_digits
    };
    format!("{:.*}", digits, value)
}

/// Scientific notation with a fixed number of mantissa digits (`12345` -> `1.23e4`).
pub fn exponential(value: f64, digits: usize) -> String {
    format!("{:.*e}", digits, value)
}

fn clamp_digits(raw: f64) -> usize {
    if raw.is_nan() {
        return MAX_DIGITS;
    }
    raw.ceil().clamp(0.0, MAX_DIGITS as f64) as usize
}
