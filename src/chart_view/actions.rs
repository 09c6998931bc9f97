use super::ViewerSession;
use crate::data_types::state::clamp_ticks;
use crate::data_types::{BackboneSeries, ForceShowMode, PaneId, ViewerConfig};
use crate::error_graph::{DensityRequest, ErrorMode, ErrorUnit};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A user-facing control of the viewer, as sent by the host UI.
///
/// Serialized as `{"action": "manual_zoom", "min_mz": 100.0, ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewerAction {
    ResetZoom,
    /// Numeric entry of the view window, applied to every pane.
    ManualZoom {
        min_mz: f64,
        max_mz: f64,
        max_intensity: f64,
    },
    SetTicks {
        x: usize,
        y: usize,
    },
    SetYSqrt {
        enabled: bool,
    },
    SetYPercent {
        enabled: bool,
    },
    SetShowUnassigned {
        enabled: bool,
    },
    SetLabelPercentage {
        value: f64,
    },
    SetMzPercentage {
        value: f64,
    },
    SetRulerMode {
        enabled: bool,
    },
    SetForceShow {
        mode: ForceShowMode,
    },
    ClearManualLabels,
    ClearHighlights,
    ClearDistances,
    SetErrorUnit {
        unit: ErrorUnit,
    },
    SetErrorMode {
        mode: ErrorMode,
    },
    SetErrorSeries {
        series: BackboneSeries,
        enabled: bool,
    },
    SetShowAssigned {
        enabled: bool,
    },
    ZoomErrorGraph {
        min: f64,
        max: f64,
    },
}

impl ViewerAction {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("failed to parse viewer action")
    }
}

impl ViewerSession {
    /// Applies a control change. Changes to the error graph filters re-project the
    /// error points and return the density request the host has to answer.
    pub fn dispatch(&mut self, action: ViewerAction) -> Option<DensityRequest> {
        debug!(?action, "dispatching action");
        match action {
            ViewerAction::ResetZoom => self.reset_zoom(),
            ViewerAction::ManualZoom {
                min_mz,
                max_mz,
                max_intensity,
            } => {
                for i in 0..self.panes.len() {
                    if let Some(pane) = PaneId::from_index(i) {
                        self.zoom(pane, min_mz, max_mz, max_intensity);
                    }
                }
            }
            ViewerAction::SetTicks { x, y } => {
                self.config.x_ticks = clamp_ticks("x_ticks", x);
                self.config.y_ticks = clamp_ticks("y_ticks", y);
                self.refresh_all_axes();
            }
            ViewerAction::SetYSqrt { enabled } => {
                self.options.y_transform.sqrt = enabled;
                self.refresh_all_axes();
            }
            ViewerAction::SetYPercent { enabled } => {
                self.options.y_transform.percent = enabled;
                self.refresh_all_axes();
            }
            ViewerAction::SetShowUnassigned { enabled } => {
                self.options.show_unassigned = enabled;
                let (config, transform) = (&self.config, self.options.y_transform);
                for pane in self.panes.iter_mut() {
                    pane.set_show_unassigned(enabled, config, transform);
                }
            }
            ViewerAction::SetLabelPercentage { value } => {
                self.config = ViewerConfig {
                    label_percentage: value,
                    ..self.config.clone()
                }
                .normalized();
                self.refresh_all_labels();
            }
            ViewerAction::SetMzPercentage { value } => {
                self.config = ViewerConfig {
                    mz_percentage: value,
                    ..self.config.clone()
                }
                .normalized();
                self.refresh_all_labels();
            }
            ViewerAction::SetRulerMode { enabled } => self.options.ruler_mode = enabled,
            ViewerAction::SetForceShow { mode } => self.options.force_show = mode,
            ViewerAction::ClearManualLabels => {
                for pane in self.panes.iter_mut() {
                    pane.clear_manual_labels();
                }
            }
            ViewerAction::ClearHighlights => self.clear_highlights(),
            ViewerAction::ClearDistances => self.clear_distances(),
            ViewerAction::SetErrorUnit { unit } => {
                self.error_graph.settings.unit = unit;
                return Some(self.error_graph.update());
            }
            ViewerAction::SetErrorMode { mode } => {
                self.error_graph.settings.mode = mode;
                return Some(self.error_graph.update());
            }
            ViewerAction::SetErrorSeries { series, enabled } => {
                self.error_graph.settings.set_enabled(series, enabled);
                return Some(self.error_graph.update());
            }
            ViewerAction::SetShowAssigned { enabled } => {
                self.error_graph.settings.show_assigned = enabled;
                return Some(self.error_graph.update());
            }
            ViewerAction::ZoomErrorGraph { min, max } => self.error_graph.zoom_y(min, max),
        }
        None
    }
}
