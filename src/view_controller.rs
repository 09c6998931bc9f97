/// ViewController holds the arithmetic of interactions (wheel zoom, pan, selection
/// mapping) independently of any event plumbing to facilitate testing.
pub struct ViewController;

impl ViewController {
    /// Pans `[min, max]` by a scroll delta. The shift is proportional to the span and
    /// never moves `min` below zero.
    pub fn pan_range(min: f64, max: f64, delta: f64, sensitivity: f64) -> (f64, f64) {
        let shift = (delta * sensitivity * (max - min)).max(-min);
        (min + shift, max + shift)
    }

    /// Zooms `[min, max]` around the pivot (fraction of the pane width under the cursor).
    ///
    /// A negative delta (scrolling up) zooms in. The pivot stays fixed: the left side
    /// moves by `pivot` of the change and the right side by the rest.
    pub fn zoom_range_at(
        min: f64,
        max: f64,
        pivot_pct: f64,
        delta: f64,
        sensitivity: f64,
    ) -> (f64, f64) {
        let pivot_pct = pivot_pct.clamp(0.0, 1.0);
        let change = -delta * sensitivity * (max - min);
        (
            (min + change * pivot_pct).max(0.0),
            max - change * (1.0 - pivot_pct),
        )
    }

    /// Symmetric zoom by `step` of the span; `zoom_in` shrinks the range.
    pub fn zoom_centered(min: f64, max: f64, step: f64, zoom_in: bool) -> (f64, f64) {
        let direction = if zoom_in { 1.0 } else { -1.0 };
        let change = step * (max - min) * 0.5 * direction;
        ((min + change).max(0.0), max - change)
    }

    /// Multiplicative factor of a ctrl-scroll on the intensity axis.
    pub fn compute_intensity_factor(delta: f64, sensitivity: f64, min_factor: f64) -> f64 {
        (1.0 + sensitivity * delta).max(min_factor)
    }

    /// Value under a pixel `offset` measured from the top of the scale, where the top
    /// edge reads `max_value` and the bottom edge reads zero. An empty scale reads
    /// `max_value`.
    pub fn value_below_top(offset_px: f32, total_px: f32, max_value: f64) -> f64 {
        if total_px <= 0.0 {
            return max_value;
        }
        let fraction = (offset_px / total_px).clamp(0.0, 1.0) as f64;
        (1.0 - fraction) * max_value
    }

    /// Horizontal extent of a drag as fractions `(low, high)` of the pane width.
    pub fn selection_fractions(start_px: f32, end_px: f32, total_px: f32) -> (f64, f64) {
        if total_px <= 0.0 {
            return (0.0, 0.0);
        }
        let low = start_px.min(end_px).max(0.0) / total_px;
        let high = start_px.max(end_px).min(total_px) / total_px;
        (low as f64, (high as f64).max(low as f64))
    }
}
