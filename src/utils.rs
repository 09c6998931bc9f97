pub mod number_formatter;

/// Clamps a pixel coordinate into `[min, extent]`, treating an empty surface as zero-sized.
pub fn clamp_px(value: f32, min: f32, extent: f32) -> f32 {
    if extent <= min {
        return extent.max(0.0);
    }
    value.clamp(min, extent)
}
