use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::YAxisTransform;

/// Tunables of the viewer. Missing fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub x_ticks: usize,
    pub y_ticks: usize,
    /// Peaks in the top `label_percentage` percent of the visible intensity get a label.
    pub label_percentage: f64,
    /// Peaks in the top `mz_percentage` percent of the visible intensity get an m/z label.
    pub mz_percentage: f64,
    /// Selections narrower than this fraction of the pane width are clicks.
    pub min_selection_fraction: f64,
    pub wheel: WheelConfig,
    /// Fraction of the m/z span removed or added by one keyboard zoom step.
    pub keyboard_zoom_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            x_ticks: 5,
            y_ticks: 5,
            label_percentage: 10.0,
            mz_percentage: 0.0,
            min_selection_fraction: 0.005,
            wheel: WheelConfig::default(),
            keyboard_zoom_step: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// `k` in the `1 + k * delta` intensity factor of a ctrl-scroll.
    pub intensity_sensitivity: f64,
    /// Lower bound of the intensity factor, keeps the bound away from zero.
    pub min_intensity_factor: f64,
    /// Fraction of the span panned per unit of scroll delta.
    pub pan_sensitivity: f64,
    /// Fraction of the span zoomed per unit of scroll delta.
    pub zoom_sensitivity: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            intensity_sensitivity: 5.0 / 10_000.0,
            min_intensity_factor: 0.05,
            pan_sensitivity: 1.0 / 10_000.0,
            zoom_sensitivity: 5.0 / 10_000.0,
        }
    }
}

impl ViewerConfig {
    pub const MIN_TICKS: usize = 2;

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).wrap_err("failed to parse viewer configuration")?;
        Ok(config.normalized())
    }

    /// Pulls out-of-range values back into their valid domain.
    pub fn normalized(mut self) -> Self {
        self.x_ticks = clamp_ticks("x_ticks", self.x_ticks);
        self.y_ticks = clamp_ticks("y_ticks", self.y_ticks);
        self.label_percentage = clamp_percentage("label_percentage", self.label_percentage);
        self.mz_percentage = clamp_percentage("mz_percentage", self.mz_percentage);
        if !(0.0..1.0).contains(&self.min_selection_fraction) {
            warn!(
                value = self.min_selection_fraction,
                "min_selection_fraction out of range, using default"
            );
            self.min_selection_fraction = Self::default().min_selection_fraction;
        }
        if !(self.wheel.min_intensity_factor > 0.0) {
            warn!(
                value = self.wheel.min_intensity_factor,
                "min_intensity_factor must be positive, using default"
            );
            self.wheel.min_intensity_factor = WheelConfig::default().min_intensity_factor;
        }
        if !(0.0..1.0).contains(&self.keyboard_zoom_step) {
            warn!(
                value = self.keyboard_zoom_step,
                "keyboard_zoom_step out of range, using default"
            );
            self.keyboard_zoom_step = Self::default().keyboard_zoom_step;
        }
        self
    }
}

pub(crate) fn clamp_ticks(axis: &str, count: usize) -> usize {
    if count < ViewerConfig::MIN_TICKS {
        warn!(axis, count, "tick count below minimum, clamping");
        ViewerConfig::MIN_TICKS
    } else {
        count
    }
}

fn clamp_percentage(field: &str, value: f64) -> f64 {
    if value.is_nan() {
        warn!(field, "percentage is NaN, using 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&value) {
        warn!(field, value, "percentage out of range, clamping");
    }
    value.clamp(0.0, 100.0)
}

/// Manual label override applied when a peak is clicked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceShowMode {
    #[default]
    None,
    Label,
    Mz,
    Hide,
}

/// Toggle state of the display controls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub y_transform: YAxisTransform,
    pub show_unassigned: bool,
    /// Pressing on a peak starts a distance measurement instead of a selection.
    pub ruler_mode: bool,
    pub force_show: ForceShowMode,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            y_transform: YAxisTransform::default(),
            show_unassigned: true,
            ruler_mode: false,
            force_show: ForceShowMode::None,
        }
    }
}
