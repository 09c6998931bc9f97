use crate::data_types::{AxisTicks, Viewport, YAxisTransform};
use crate::utils::number_formatter::{exponential, fancy_round, precision_for_span};

/// Recomputes tick labels of a pane from its viewport.
pub struct AxisRenderer;

impl AxisRenderer {
    /// Evenly spaced m/z ticks across `[min_mz, max_mz]`, with as many decimals as
    /// the visible span needs.
    pub fn update_x_axis(ticks: &mut AxisTicks, viewport: &Viewport, count: usize) {
        ticks.resize(count);
        let digits = precision_for_span(viewport.span(), 0);
        for i in 0..ticks.len() {
            let value = viewport.mz_at(ticks.fraction(i));
            ticks.values[i] = value;
            ticks.labels[i] = format!("{:.*}", digits, value);
        }
    }

    /// Intensity ticks across `[0, max_intensity]`.
    pub fn update_y_axis(
        ticks: &mut AxisTicks,
        viewport: &Viewport,
        count: usize,
        transform: YAxisTransform,
    ) {
        ticks.resize(count);
        let max_y = viewport.max_intensity;
        let initial = viewport.bounds().initial_max_intensity;
        let top = Self::transform_intensity(max_y, initial, transform);

        for i in 0..ticks.len() {
            let value = Self::transform_intensity(ticks.fraction(i) * max_y, initial, transform);
            ticks.values[i] = value;
            ticks.labels[i] = if i == 0 {
                "0".to_string()
            } else if transform.percent {
                fancy_round(top, 0.0, value, 0)
            } else {
                exponential(value.round(), 2)
            };
        }
    }

    pub fn transform_intensity(value: f64, initial_max: f64, transform: YAxisTransform) -> f64 {
        match (transform.sqrt, transform.percent) {
            (false, false) => value,
            (true, false) => value.sqrt(),
            (false, true) => value / initial_max * 100.0,
            (true, true) => value.sqrt() / initial_max.sqrt() * 100.0,
        }
    }

    /// Min/max texts of the error graph x-axis, which follows the spectrum m/z range.
    pub fn error_x_axis_labels(viewport: &Viewport) -> (String, String) {
        let digits = precision_for_span(viewport.span(), 0);
        (
            format!("{:.*}", digits, viewport.min_mz),
            format!("{:.*}", digits, viewport.max_mz),
        )
    }
}
