pub mod actions;
pub mod input;

use crate::chart_pane::{ChartPane, PaneInput, Surface};
use crate::data_types::{
    DisplayOptions, DistanceAnnotation, ErrorPoint, HighlightColour, PaneId, ViewerConfig,
};
use crate::error_graph::{DensityRequest, ErrorGraph, ErrorGraphSettings};
use crate::highlight::{HighlightEngine, HighlightTarget};
use eyre::{bail, Result};
use tracing::{debug, info};

pub use actions::ViewerAction;
pub use input::{
    DistanceAnchor, GestureController, GestureOutcome, KeyEvent, PointerEvent, Selection,
    WheelEvent,
};

use self::input::GestureContext;

/// One viewer: up to two linked spectrum panes, the gesture and highlight state that
/// spans them, and the error graph of the first pane.
pub struct ViewerSession {
    pub config: ViewerConfig,
    options: DisplayOptions,
    panes: Vec<ChartPane>,
    gestures: GestureController,
    highlights: HighlightEngine,
    pub error_graph: ErrorGraph,
    initial_density: Option<DensityRequest>,
}

impl ViewerSession {
    /// Builds a session from one or two spectra. The density request of the first
    /// projection is kept until [`Self::take_density_request`] collects it.
    pub fn new(
        config: ViewerConfig,
        panes: Vec<PaneInput>,
        error_points: Vec<ErrorPoint>,
    ) -> Result<Self> {
        let mut session = Self {
            config: config.normalized(),
            options: DisplayOptions::default(),
            panes: vec![],
            gestures: GestureController::new(),
            highlights: HighlightEngine::new(),
            error_graph: ErrorGraph::new(vec![], ErrorGraphSettings::default()),
            initial_density: None,
        };
        session.initial_density = Some(session.load(panes, error_points)?);
        Ok(session)
    }

    pub fn take_density_request(&mut self) -> Option<DensityRequest> {
        self.initial_density.take()
    }

    /// Replaces the spectra and error points. Gestures, highlights and distances are
    /// dropped with the old peaks; display options are kept. The error points are
    /// projected right away and the returned request asks for their density overlay.
    pub fn load(
        &mut self,
        panes: Vec<PaneInput>,
        error_points: Vec<ErrorPoint>,
    ) -> Result<DensityRequest> {
        if panes.is_empty() {
            bail!("a viewer needs at least one spectrum");
        }
        if panes.len() > 2 {
            bail!("a viewer shows at most two spectra, got {}", panes.len());
        }
        if let Some(index) = panes.iter().position(|p| !p.bounds.is_valid()) {
            bail!(
                "spectrum {index} has invalid initial bounds: {:?}",
                panes[index].bounds
            );
        }

        let surfaces: Vec<Surface> = self.panes.iter().map(|p| p.surface).collect();
        self.panes = panes
            .into_iter()
            .enumerate()
            .filter_map(|(i, input)| PaneId::from_index(i).map(|id| ChartPane::new(id, input)))
            .collect();
        for (pane, surface) in self.panes.iter_mut().zip(surfaces) {
            pane.surface = surface;
        }
        self.gestures.reset();
        self.highlights = HighlightEngine::new();
        self.initial_density = None;
        let request = self.error_graph.set_points(error_points);

        let (config, options) = (&self.config, self.options);
        for pane in self.panes.iter_mut() {
            pane.set_show_unassigned(options.show_unassigned, config, options.y_transform);
            pane.refresh_labels(config);
            pane.refresh_axes(config, options.y_transform);
        }
        self.sync_error_axis();
        info!(
            panes = self.panes.len(),
            peaks = self.panes.iter().map(|p| p.peaks.len()).sum::<usize>(),
            "spectra loaded"
        );
        Ok(request)
    }

    /// Drops every gesture, highlight and distance and restores the initial zoom.
    pub fn reset(&mut self) {
        self.gestures.reset();
        self.highlights.clear_all(&mut self.panes);
        for pane in self.panes.iter_mut() {
            pane.clear_distances();
            pane.clear_manual_labels();
        }
        self.reset_zoom();
    }

    pub fn panes(&self) -> &[ChartPane] {
        &self.panes
    }

    pub fn pane(&self, id: PaneId) -> Option<&ChartPane> {
        self.panes.get(id.index())
    }

    /// Two panes share their m/z range and mirror selections.
    pub fn is_mirrored(&self) -> bool {
        self.panes.len() == 2
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn highlights(&self) -> &HighlightEngine {
        &self.highlights
    }

    pub fn set_surface(&mut self, pane: PaneId, width: f32, height: f32) {
        match self.panes.get_mut(pane.index()) {
            Some(chart) => {
                chart.surface = Surface {
                    width: width.max(0.0),
                    height: height.max(0.0),
                }
            }
            None => debug!(?pane, "surface for a pane that is not shown"),
        }
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> GestureOutcome {
        self.with_gestures(|gestures, ctx| gestures.handle_press(ctx, event))
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> GestureOutcome {
        self.with_gestures(|gestures, ctx| gestures.handle_move(ctx, event))
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> GestureOutcome {
        self.with_gestures(|gestures, ctx| gestures.handle_release(ctx, event))
    }

    pub fn pointer_leave(&mut self, pane: PaneId) -> GestureOutcome {
        self.gestures.handle_leave(pane)
    }

    pub fn wheel(&mut self, event: WheelEvent) -> GestureOutcome {
        self.with_gestures(|gestures, ctx| gestures.handle_wheel(ctx, event))
    }

    pub fn key(&mut self, event: &KeyEvent) -> GestureOutcome {
        self.with_gestures(|gestures, ctx| gestures.handle_key(ctx, event))
    }

    fn with_gestures(
        &mut self,
        f: impl FnOnce(&mut GestureController, &mut GestureContext) -> GestureOutcome,
    ) -> GestureOutcome {
        let mut ctx = GestureContext {
            panes: &mut self.panes,
            config: &self.config,
            options: &self.options,
        };
        let outcome = f(&mut self.gestures, &mut ctx);
        self.sync_error_axis();
        outcome
    }

    /// Zooms one pane. Returns `false` for a degenerate range.
    pub fn zoom(&mut self, pane: PaneId, min_mz: f64, max_mz: f64, max_intensity: f64) -> bool {
        let (config, transform) = (&self.config, self.options.y_transform);
        let applied = self
            .panes
            .get_mut(pane.index())
            .is_some_and(|p| p.zoom(min_mz, max_mz, max_intensity, config, transform));
        self.sync_error_axis();
        applied
    }

    pub fn reset_zoom(&mut self) {
        let (config, transform) = (&self.config, self.options.y_transform);
        for pane in self.panes.iter_mut() {
            pane.reset_zoom(config, transform);
        }
        self.sync_error_axis();
    }

    pub fn remove_distance(&mut self, pane: PaneId, index: usize) -> Option<DistanceAnnotation> {
        self.panes.get_mut(pane.index())?.remove_distance(index)
    }

    pub fn clear_distances(&mut self) {
        for pane in self.panes.iter_mut() {
            pane.clear_distances();
        }
    }

    pub fn hover(&mut self, target: HighlightTarget, on: bool) {
        self.highlights.hover(&mut self.panes, target, on);
    }

    pub fn toggle_highlight(&mut self, target: HighlightTarget, colour: Option<HighlightColour>) {
        self.highlights.toggle(&mut self.panes, target, colour);
    }

    pub fn set_highlight(
        &mut self,
        target: HighlightTarget,
        on: bool,
        colour: Option<HighlightColour>,
    ) {
        self.highlights.set_permanent(&mut self.panes, target, on, colour);
    }

    pub fn toggle_highlight_range(
        &mut self,
        sequence: usize,
        from: usize,
        to: usize,
        colour: Option<HighlightColour>,
    ) {
        self.highlights
            .toggle_range(&mut self.panes, sequence, from, to, colour);
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear_all(&mut self.panes);
    }

    fn refresh_all_axes(&mut self) {
        let (config, transform) = (&self.config, self.options.y_transform);
        for pane in self.panes.iter_mut() {
            pane.refresh_axes(config, transform);
        }
    }

    fn refresh_all_labels(&mut self) {
        for pane in self.panes.iter_mut() {
            pane.refresh_labels(&self.config);
        }
    }

    fn sync_error_axis(&mut self) {
        if let Some(first) = self.panes.first() {
            self.error_graph.sync_x_axis(&first.viewport);
        }
    }
}
