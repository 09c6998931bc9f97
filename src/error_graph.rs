//! Error graph projection
//!
//! Projects the mass error of every peak onto the secondary error plot and asks an
//! external estimator for the density overlay drawn next to it. The estimator may
//! answer asynchronously: `update` hands out a numbered `DensityRequest` and whatever
//! completes last is shown. Responses are not sequenced, so a slow answer to an old
//! request can replace the overlay of a newer one.

use crate::axis_renderer::AxisRenderer;
use crate::data_types::{BackboneSeries, ClosestIon, ErrorPoint, Viewport};
use crate::utils::number_formatter::fancy_round;
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Renderable markup returned by the density estimator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DensityOverlay(pub String);

/// The external component turning error values into a distribution overlay.
pub trait DensityEstimator {
    fn estimate(&self, values: &[f64]) -> Result<DensityOverlay>;
}

impl<F> DensityEstimator for F
where
    F: Fn(&[f64]) -> Result<DensityOverlay>,
{
    fn estimate(&self, values: &[f64]) -> Result<DensityOverlay> {
        self(values)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DensityRequest {
    pub id: u64,
    pub values: Vec<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Error of each peak to its own annotation.
    #[default]
    Assigned,
    /// Error of each peak to the closest theoretical ion of the enabled series.
    ClosestUnassigned,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorUnit {
    /// Dalton.
    Absolute,
    /// Parts per million.
    #[default]
    Relative,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorGraphSettings {
    pub mode: ErrorMode,
    pub unit: ErrorUnit,
    /// Enabled series, indexed by `BackboneSeries::index`.
    pub series: [bool; 6],
    /// In closest-ion mode, also show peaks that already have an annotation.
    pub show_assigned: bool,
}

impl Default for ErrorGraphSettings {
    fn default() -> Self {
        Self {
            mode: ErrorMode::Assigned,
            unit: ErrorUnit::Relative,
            series: [true; 6],
            show_assigned: false,
        }
    }
}

impl ErrorGraphSettings {
    pub fn is_enabled(&self, series: BackboneSeries) -> bool {
        self.series[series.index()]
    }

    pub fn set_enabled(&mut self, series: BackboneSeries, enabled: bool) {
        self.series[series.index()] = enabled;
    }
}

/// Position of one point on the error plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedPoint {
    pub mz: f64,
    /// `None` hides the point.
    pub y: Option<f64>,
    /// Fragment the error refers to in closest-ion mode.
    pub label: String,
}

/// Manually chosen y window of the error plot.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorYRange {
    pub min: f64,
    pub max: f64,
    pub min_label: String,
    pub max_label: String,
    /// Both bounds are positive, so the x-axis sits at the bottom.
    pub hug_bottom: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ErrorGraph {
    pub settings: ErrorGraphSettings,
    points: Vec<ErrorPoint>,
    projected: Vec<ProjectedPoint>,
    overlay: Option<DensityOverlay>,
    overlay_request: Option<u64>,
    next_request: u64,
    y_range: Option<ErrorYRange>,
    x_axis: (String, String),
}

impl ErrorGraph {
    pub fn new(points: Vec<ErrorPoint>, settings: ErrorGraphSettings) -> Self {
        Self {
            settings,
            points,
            ..Default::default()
        }
    }

    pub fn points(&self) -> &[ErrorPoint] {
        &self.points
    }

    pub fn projected(&self) -> &[ProjectedPoint] {
        &self.projected
    }

    pub fn overlay(&self) -> Option<&DensityOverlay> {
        self.overlay.as_ref()
    }

    /// Id of the request whose answer is currently shown.
    pub fn overlay_request(&self) -> Option<u64> {
        self.overlay_request
    }

    pub fn y_range(&self) -> Option<&ErrorYRange> {
        self.y_range.as_ref()
    }

    pub fn x_axis_labels(&self) -> (&str, &str) {
        (&self.x_axis.0, &self.x_axis.1)
    }

    /// Replaces the points and re-projects them.
    pub fn set_points(&mut self, points: Vec<ErrorPoint>) -> DensityRequest {
        self.points = points;
        self.update()
    }

    /// Re-projects every point and returns the request for the density overlay.
    pub fn update(&mut self) -> DensityRequest {
        self.projected = self
            .points
            .iter()
            .map(|point| project(point, &self.settings))
            .collect();
        let values = self.projected.iter().filter_map(|p| p.y).collect();
        let id = self.next_request;
        self.next_request += 1;
        DensityRequest { id, values }
    }

    /// Stores the answer of the estimator. Failures keep the previous overlay.
    pub fn complete(&mut self, request: u64, result: Result<DensityOverlay>) {
        match result {
            Ok(overlay) => {
                let latest = self.next_request.saturating_sub(1);
                if request < latest {
                    debug!(request, latest, "showing superseded density");
                }
                self.overlay = Some(overlay);
                self.overlay_request = Some(request);
            }
            Err(err) => warn!(request, "density estimation failed: {err:#}"),
        }
    }

    /// Re-projects and runs the estimator in place.
    pub fn refresh(&mut self, estimator: &impl DensityEstimator) {
        let request = self.update();
        let result = estimator.estimate(&request.values);
        self.complete(request.id, result);
    }

    /// Follows the m/z range of the spectrum for the axis texts.
    pub fn sync_x_axis(&mut self, viewport: &Viewport) {
        self.x_axis = AxisRenderer::error_x_axis_labels(viewport);
    }

    pub fn zoom_y(&mut self, min: f64, max: f64) {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            debug!(min, max, "discarding degenerate error graph range");
            return;
        }
        self.y_range = Some(ErrorYRange {
            min,
            max,
            min_label: fancy_round(max, min, min, 0),
            max_label: fancy_round(max, min, max, 0),
            hug_bottom: min > 0.0 && max > 0.0,
        });
    }

    /// Value under the pointer `offset` pixels below the top of a plot `height` tall.
    pub fn ruler_value(&self, offset: f32, height: f32) -> Option<String> {
        let range = self.y_range.as_ref()?;
        if height <= 0.0 {
            return None;
        }
        let value = range.max - (offset / height) as f64 * (range.max - range.min);
        Some(fancy_round(range.max, range.min, value, 1))
    }

    pub fn title(&self) -> String {
        let assigned = self.settings.mode == ErrorMode::Assigned;
        let which = if assigned {
            "assigned "
        } else if self.settings.show_assigned {
            ""
        } else {
            "unassigned "
        };
        let reference = if assigned {
            "the annotation"
        } else {
            "the closest theoretical ion"
        };
        let unit = match self.settings.unit {
            ErrorUnit::Relative => "ppm",
            ErrorUnit::Absolute => "Da",
        };
        format!("The error for all {which}peaks as compared to {reference} ({unit})")
    }
}

fn project(point: &ErrorPoint, settings: &ErrorGraphSettings) -> ProjectedPoint {
    let (y, label) = match settings.mode {
        ErrorMode::Assigned => {
            let y = match settings.unit {
                ErrorUnit::Relative => point.assigned_rel,
                ErrorUnit::Absolute => point.assigned_abs,
            };
            (y, String::new())
        }
        ErrorMode::ClosestUnassigned if !settings.show_assigned && point.is_assigned() => {
            (None, String::new())
        }
        ErrorMode::ClosestUnassigned => {
            let candidates = match settings.unit {
                ErrorUnit::Relative => &point.unassigned_rel,
                ErrorUnit::Absolute => &point.unassigned_abs,
            };
            match closest(candidates, settings) {
                Some(ion) => (Some(ion.value), ion.fragment.clone()),
                None => (None, String::new()),
            }
        }
    };
    ProjectedPoint {
        mz: point.mz,
        y: y.filter(|v| v.is_finite()),
        label,
    }
}

/// Smallest magnitude candidate among the enabled series; ties keep the earlier series.
fn closest<'a>(
    candidates: &'a [Option<ClosestIon>; 6],
    settings: &ErrorGraphSettings,
) -> Option<&'a ClosestIon> {
    let mut best: Option<&ClosestIon> = None;
    for series in BackboneSeries::ALL {
        if !settings.is_enabled(series) {
            continue;
        }
        let Some(candidate) = &candidates[series.index()] else {
            continue;
        };
        if candidate.value.is_nan() {
            continue;
        }
        if best.map_or(true, |b| candidate.value.abs() < b.value.abs()) {
            best = Some(candidate);
        }
    }
    best
}
