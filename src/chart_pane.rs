//! Chart pane
//!
//! A `ChartPane` is one rendered spectrum: its peaks, its viewport, the tick labels
//! derived from that viewport and the distance annotations drawn on it. Every change
//! of the viewport goes through this type so that the derived state stays in sync.

use crate::axis_renderer::AxisRenderer;
use crate::data_types::{
    AxisTicks, DistanceAnnotation, ForceShowMode, PaneId, Peak, PeakInput, ViewerConfig, Viewport,
    ViewportBounds, YAxisTransform, ZoomEffect,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Everything the backend provides for one pane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaneInput {
    pub peaks: Vec<PeakInput>,
    pub bounds: ViewportBounds,
}

/// Size of the render surface of a pane, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

pub struct ChartPane {
    pub id: PaneId,
    pub viewport: Viewport,
    pub peaks: Vec<Peak>,
    pub distances: Vec<DistanceAnnotation>,
    pub x_axis: AxisTicks,
    pub y_axis: AxisTicks,
    pub surface: Surface,
}

impl ChartPane {
    pub fn new(id: PaneId, input: PaneInput) -> Self {
        Self {
            id,
            viewport: Viewport::new(input.bounds),
            peaks: input.peaks.into_iter().map(Peak::from).collect(),
            distances: vec![],
            x_axis: AxisTicks::default(),
            y_axis: AxisTicks::default(),
            surface: Surface::default(),
        }
    }

    /// Applies a zoom and re-derives everything that depends on the viewport.
    /// Returns `false` when the range was degenerate and nothing changed.
    pub fn zoom(
        &mut self,
        min_mz: f64,
        max_mz: f64,
        max_intensity: f64,
        config: &ViewerConfig,
        transform: YAxisTransform,
    ) -> bool {
        match self.viewport.zoom(min_mz, max_mz, max_intensity) {
            Some(effect) => {
                trace!(
                    pane = ?self.id,
                    min_mz = self.viewport.min_mz,
                    max_mz = self.viewport.max_mz,
                    max_intensity = self.viewport.max_intensity,
                    "zoom applied"
                );
                self.after_viewport_change(effect, config, transform);
                true
            }
            None => false,
        }
    }

    pub fn reset_zoom(&mut self, config: &ViewerConfig, transform: YAxisTransform) {
        let effect = self.viewport.reset();
        self.after_viewport_change(effect, config, transform);
    }

    pub fn set_show_unassigned(
        &mut self,
        show: bool,
        config: &ViewerConfig,
        transform: YAxisTransform,
    ) {
        if self.viewport.set_show_unassigned(show) {
            self.after_viewport_change(ZoomEffect { labels_stale: true }, config, transform);
        }
    }

    fn after_viewport_change(
        &mut self,
        effect: ZoomEffect,
        config: &ViewerConfig,
        transform: YAxisTransform,
    ) {
        if effect.labels_stale {
            self.refresh_labels(config);
        }
        self.refresh_axes(config, transform);
    }

    /// Regenerates both axes and the precision of the distance labels.
    pub fn refresh_axes(&mut self, config: &ViewerConfig, transform: YAxisTransform) {
        AxisRenderer::update_x_axis(&mut self.x_axis, &self.viewport, config.x_ticks);
        AxisRenderer::update_y_axis(&mut self.y_axis, &self.viewport, config.y_ticks, transform);
        let (min_mz, max_mz) = (self.viewport.min_mz, self.viewport.max_mz);
        for distance in self.distances.iter_mut() {
            distance.relabel(min_mz, max_mz);
        }
    }

    /// Recomputes which peaks carry a label, an m/z label, or are cut off at the top.
    pub fn refresh_labels(&mut self, config: &ViewerConfig) {
        let max = self.viewport.max_intensity;
        let label_threshold = (100.0 - config.label_percentage) / 100.0 * max;
        let mz_threshold = (100.0 - config.mz_percentage) / 100.0 * max;
        for peak in self.peaks.iter_mut() {
            peak.labels.show_label =
                config.label_percentage != 0.0 && peak.intensity >= label_threshold;
            peak.labels.show_mz = config.mz_percentage != 0.0 && peak.intensity >= mz_threshold;
            peak.labels.cut = peak.intensity > max;
        }
    }

    /// Adds the distance between two peaks of this pane.
    /// Returns `None` for the same peak twice or unknown indices.
    pub fn add_distance(&mut self, first: usize, second: usize) -> Option<&DistanceAnnotation> {
        if first == second {
            return None;
        }
        let a = self.peaks.get(first)?;
        let b = self.peaks.get(second)?;
        let annotation = DistanceAnnotation::between(
            (a.mz, a.intensity),
            (b.mz, b.intensity),
            self.viewport.min_mz,
            self.viewport.max_mz,
        );
        self.distances.push(annotation);
        self.distances.last()
    }

    pub fn remove_distance(&mut self, index: usize) -> Option<DistanceAnnotation> {
        (index < self.distances.len()).then(|| self.distances.remove(index))
    }

    pub fn clear_distances(&mut self) {
        self.distances.clear();
    }

    /// Applies the manual label override of a click on a peak.
    pub fn force_show(&mut self, peak: usize, mode: ForceShowMode) {
        let Some(peak) = self.peaks.get_mut(peak) else {
            return;
        };
        let labels = &mut peak.labels;
        match mode {
            ForceShowMode::None => {}
            ForceShowMode::Label => {
                labels.manual_label = match labels.manual_label {
                    Some(_) => None,
                    None => Some(true),
                };
            }
            ForceShowMode::Mz => {
                labels.manual_mz = match labels.manual_mz {
                    Some(_) => None,
                    None => Some(true),
                };
            }
            ForceShowMode::Hide => {
                labels.manual_label = Some(false);
                labels.manual_mz = Some(false);
            }
        }
    }

    pub fn clear_manual_labels(&mut self) {
        for peak in self.peaks.iter_mut() {
            peak.labels.manual_label = None;
            peak.labels.manual_mz = None;
        }
    }
}
