use serde::{Deserialize, Serialize};
use tracing::debug;

/// Initial bounds of a pane, computed by the backend from the full peak list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub initial_max_mz: f64,
    pub initial_max_intensity: f64,
    /// Intensity bound used while unassigned peaks are hidden.
    pub initial_max_intensity_assigned: f64,
}

impl ViewportBounds {
    pub fn new(max_mz: f64, max_intensity: f64, max_intensity_assigned: f64) -> Self {
        Self {
            initial_max_mz: max_mz,
            initial_max_intensity: max_intensity,
            initial_max_intensity_assigned: max_intensity_assigned,
        }
    }

    pub fn is_valid(&self) -> bool {
        [
            self.initial_max_mz,
            self.initial_max_intensity,
            self.initial_max_intensity_assigned,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Result of an applied zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomEffect {
    /// The intensity bound moved, so intensity dependent label flags are stale.
    pub labels_stale: bool,
}

/// The visible `[min_mz, max_mz] x [0, max_intensity]` window of a pane.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub min_mz: f64,
    pub max_mz: f64,
    pub max_intensity: f64,
    pub zoomed: bool,
    bounds: ViewportBounds,
    last_applied_intensity: Option<f64>,
}

impl Viewport {
    pub fn new(bounds: ViewportBounds) -> Self {
        Self {
            min_mz: 0.0,
            max_mz: bounds.initial_max_mz,
            max_intensity: bounds.initial_max_intensity,
            zoomed: false,
            bounds,
            last_applied_intensity: Some(bounds.initial_max_intensity),
        }
    }

    pub fn bounds(&self) -> &ViewportBounds {
        &self.bounds
    }

    pub fn span(&self) -> f64 {
        self.max_mz - self.min_mz
    }

    /// Sets the displayed range. `min_mz` is clamped to zero; degenerate ranges
    /// are discarded and return `None`.
    pub fn zoom(&mut self, min_mz: f64, max_mz: f64, max_intensity: f64) -> Option<ZoomEffect> {
        if !min_mz.is_finite() || !max_mz.is_finite() {
            debug!(min_mz, max_mz, "discarding non-finite zoom");
            return None;
        }
        let min_mz = min_mz.max(0.0);
        if max_mz <= min_mz {
            debug!(min_mz, max_mz, "discarding empty zoom range");
            return None;
        }
        let max_intensity = if max_intensity.is_finite() && max_intensity > 0.0 {
            max_intensity
        } else {
            self.max_intensity
        };

        self.min_mz = min_mz;
        self.max_mz = max_mz;
        self.max_intensity = max_intensity;
        self.zoomed = true;

        let labels_stale = self.last_applied_intensity != Some(max_intensity);
        self.last_applied_intensity = Some(max_intensity);
        Some(ZoomEffect { labels_stale })
    }

    /// Restores the initial window. Always marks labels stale.
    pub fn reset(&mut self) -> ZoomEffect {
        self.min_mz = 0.0;
        self.max_mz = self.bounds.initial_max_mz;
        self.max_intensity = self.bounds.initial_max_intensity;
        self.zoomed = false;
        self.last_applied_intensity = Some(self.max_intensity);
        ZoomEffect { labels_stale: true }
    }

    /// Swaps between the two canonical intensity bounds when unassigned peaks are
    /// shown or hidden. A manually chosen intensity is left alone.
    /// Returns whether the intensity changed.
    pub fn set_show_unassigned(&mut self, show: bool) -> bool {
        let (from, to) = if show {
            (
                self.bounds.initial_max_intensity_assigned,
                self.bounds.initial_max_intensity,
            )
        } else {
            (
                self.bounds.initial_max_intensity,
                self.bounds.initial_max_intensity_assigned,
            )
        };
        if self.max_intensity == from && from != to {
            self.max_intensity = to;
            self.last_applied_intensity = Some(to);
            true
        } else {
            false
        }
    }

    /// Maps a fraction of the pane width onto the current m/z range.
    pub fn mz_at(&self, fraction: f64) -> f64 {
        self.min_mz + self.span() * fraction
    }
}
