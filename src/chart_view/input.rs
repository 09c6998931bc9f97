use crate::chart_pane::{ChartPane, Surface};
use crate::data_types::{
    DisplayOptions, ForceShowMode, PaneId, SelectionRect, VerticalAnchor, ViewerConfig,
};
use crate::utils::clamp_px;
use crate::view_controller::ViewController;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Press, move, release or leave on a pane, in surface pixels (origin top-left).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pane: PaneId,
    pub x: f32,
    pub y: f32,
    /// Index of the peak under the pointer, if any.
    #[serde(default)]
    pub peak: Option<usize>,
}

impl PointerEvent {
    pub fn new(pane: PaneId, x: f32, y: f32) -> Self {
        Self {
            pane,
            x,
            y,
            peak: None,
        }
    }

    pub fn on_peak(mut self, peak: usize) -> Self {
        self.peak = Some(peak);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelEvent {
    pub pane: PaneId,
    pub x: f32,
    pub delta_x: f64,
    pub delta_y: f64,
    pub ctrl: bool,
    pub shift: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
}

impl KeyEvent {
    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }
}

/// What an input event did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    SelectionStarted,
    SelectionMoved,
    SelectionSuspended,
    SelectionResumed,
    /// The release was too narrow to be a zoom.
    SelectionDiscarded,
    Zoomed,
    AnchorArmed,
    AnchorCancelled,
    DistanceAdded,
    LabelToggled,
    Panned,
    IntensityScaled,
    Reset,
}

/// A rubber-band zoom in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub pane: PaneId,
    pub start_x: f32,
    pub rect: SelectionRect,
    /// Mirror shown in the partner pane of a linked pair.
    pub linked: Option<SelectionRect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceAnchor {
    pub pane: PaneId,
    pub peak: usize,
}

/// Borrowed session state a gesture operates on.
pub struct GestureContext<'a> {
    pub panes: &'a mut [ChartPane],
    pub config: &'a ViewerConfig,
    pub options: &'a DisplayOptions,
}

impl GestureContext<'_> {
    fn pane(&self, id: PaneId) -> Option<&ChartPane> {
        self.panes.get(id.index())
    }

    fn is_linked(&self) -> bool {
        self.panes.len() == 2
    }

    fn zoom(&mut self, id: PaneId, min_mz: f64, max_mz: f64, max_intensity: f64) -> bool {
        let (config, transform) = (self.config, self.options.y_transform);
        match self.panes.get_mut(id.index()) {
            Some(pane) => pane.zoom(min_mz, max_mz, max_intensity, config, transform),
            None => false,
        }
    }

    /// Applies the m/z range of `id` to its partner, which keeps its own intensity.
    fn mirror_range(&mut self, id: PaneId) {
        if !self.is_linked() {
            return;
        }
        let Some(source) = self.pane(id) else {
            return;
        };
        let (min_mz, max_mz) = (source.viewport.min_mz, source.viewport.max_mz);
        let partner = id.partner();
        if let Some(max_intensity) = self.pane(partner).map(|p| p.viewport.max_intensity) {
            self.zoom(partner, min_mz, max_mz, max_intensity);
        }
    }
}

/// State machine of pointer, wheel and keyboard gestures.
///
/// At most one selection is active. A selection whose pointer left the pane is kept as
/// `suspended` and resumes when the pointer re-enters the same pane or its partner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureController {
    selection: Option<Selection>,
    suspended: Option<Selection>,
    anchor: Option<DistanceAnchor>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn suspended(&self) -> Option<&Selection> {
        self.suspended.as_ref()
    }

    pub fn anchor(&self) -> Option<DistanceAnchor> {
        self.anchor
    }

    pub fn is_selecting(&self) -> bool {
        self.selection.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn handle_press(&mut self, ctx: &mut GestureContext, event: PointerEvent) -> GestureOutcome {
        if ctx.options.ruler_mode {
            if let Some(peak) = event.peak {
                self.anchor = Some(DistanceAnchor {
                    pane: event.pane,
                    peak,
                });
                return GestureOutcome::AnchorArmed;
            }
        }
        let Some(pane) = ctx.pane(event.pane) else {
            return GestureOutcome::Ignored;
        };
        let width = pane.surface.width;
        if width <= 0.0 {
            debug!(pane = ?event.pane, "press on a pane without a surface");
            return GestureOutcome::Ignored;
        }

        let start_x = clamp_px(event.x, 0.0, width);
        let mut selection = Selection {
            pane: event.pane,
            start_x,
            rect: empty_rect(event.pane, start_x, false),
            linked: ctx
                .is_linked()
                .then(|| empty_rect(event.pane.partner(), start_x, true)),
        };
        update_selection(&mut selection, ctx, event.x, event.y);
        self.selection = Some(selection);
        self.suspended = None;
        GestureOutcome::SelectionStarted
    }

    pub fn handle_move(&mut self, ctx: &mut GestureContext, event: PointerEvent) -> GestureOutcome {
        if let Some(selection) = self.selection.as_mut() {
            if selection.pane != event.pane {
                return GestureOutcome::Ignored;
            }
            update_selection(selection, ctx, event.x, event.y);
            return GestureOutcome::SelectionMoved;
        }

        let Some(mut selection) = self.suspended else {
            return GestureOutcome::Ignored;
        };
        if event.pane != selection.pane {
            let Some(linked) = selection.linked else {
                return GestureOutcome::Ignored;
            };
            if linked.pane != event.pane {
                return GestureOutcome::Ignored;
            }
            // Continue the drag from the mirrored side.
            selection.linked = Some(SelectionRect {
                linked: true,
                ..selection.rect
            });
            selection.rect = SelectionRect {
                linked: false,
                ..linked
            };
            selection.pane = event.pane;
        }
        update_selection(&mut selection, ctx, event.x, event.y);
        self.selection = Some(selection);
        self.suspended = None;
        GestureOutcome::SelectionResumed
    }

    pub fn handle_leave(&mut self, pane: PaneId) -> GestureOutcome {
        self.anchor = None;
        match self.selection {
            Some(selection) if selection.pane == pane => {
                self.selection = None;
                self.suspended = Some(selection);
                GestureOutcome::SelectionSuspended
            }
            Some(_) => GestureOutcome::Ignored,
            None => {
                self.suspended = None;
                GestureOutcome::Ignored
            }
        }
    }

    pub fn handle_release(
        &mut self,
        ctx: &mut GestureContext,
        event: PointerEvent,
    ) -> GestureOutcome {
        if let Some(anchor) = self.anchor {
            if let Some(peak) = event.peak {
                self.anchor = None;
                return self.complete_distance(ctx, anchor, event.pane, peak);
            }
        }

        let outcome = match self.selection.take() {
            Some(selection) if selection.pane == event.pane => {
                self.suspended = None;
                self.commit(ctx, selection, event)
            }
            Some(selection) => {
                debug!(from = ?selection.pane, to = ?event.pane, "release on another pane");
                GestureOutcome::SelectionDiscarded
            }
            None => {
                self.suspended = None;
                GestureOutcome::Ignored
            }
        };

        match (outcome, event.peak, ctx.options.force_show) {
            (GestureOutcome::Zoomed, _, _) | (_, None, _) | (_, _, ForceShowMode::None) => outcome,
            (_, Some(peak), mode) => {
                if let Some(pane) = ctx.panes.get_mut(event.pane.index()) {
                    pane.force_show(peak, mode);
                }
                GestureOutcome::LabelToggled
            }
        }
    }

    fn complete_distance(
        &mut self,
        ctx: &mut GestureContext,
        anchor: DistanceAnchor,
        pane: PaneId,
        peak: usize,
    ) -> GestureOutcome {
        if anchor.pane != pane || anchor.peak == peak {
            return GestureOutcome::AnchorCancelled;
        }
        let added = ctx
            .panes
            .get_mut(pane.index())
            .and_then(|chart| chart.add_distance(anchor.peak, peak));
        match added {
            Some(_) => GestureOutcome::DistanceAdded,
            None => GestureOutcome::AnchorCancelled,
        }
    }

    fn commit(
        &mut self,
        ctx: &mut GestureContext,
        selection: Selection,
        event: PointerEvent,
    ) -> GestureOutcome {
        let Some(pane) = ctx.pane(selection.pane) else {
            return GestureOutcome::Ignored;
        };
        let surface = pane.surface;
        let (low, high) =
            ViewController::selection_fractions(selection.start_x, event.x, surface.width);
        if high - low < ctx.config.min_selection_fraction {
            debug!(pane = ?selection.pane, low, high, "selection too narrow, treating as click");
            return GestureOutcome::SelectionDiscarded;
        }

        let viewport = &pane.viewport;
        let (min_mz, max_mz) = (viewport.mz_at(low), viewport.mz_at(high));
        let offset = commit_offset(selection.pane, event.y, surface.height);
        let max_intensity =
            ViewController::value_below_top(offset, surface.height, viewport.max_intensity);

        if !ctx.zoom(selection.pane, min_mz, max_mz, max_intensity) {
            return GestureOutcome::SelectionDiscarded;
        }
        if selection.linked.is_some() {
            ctx.mirror_range(selection.pane);
        }
        GestureOutcome::Zoomed
    }

    pub fn handle_wheel(&mut self, ctx: &mut GestureContext, event: WheelEvent) -> GestureOutcome {
        let Some(pane) = ctx.pane(event.pane) else {
            return GestureOutcome::Ignored;
        };
        let wheel = &ctx.config.wheel;
        let viewport = &pane.viewport;
        let (min_mz, max_mz, max_intensity) =
            (viewport.min_mz, viewport.max_mz, viewport.max_intensity);

        if event.delta_y != 0.0 && event.ctrl {
            let factor = ViewController::compute_intensity_factor(
                event.delta_y,
                wheel.intensity_sensitivity,
                wheel.min_intensity_factor,
            );
            return if ctx.zoom(event.pane, min_mz, max_mz, max_intensity * factor) {
                GestureOutcome::IntensityScaled
            } else {
                GestureOutcome::Ignored
            };
        }

        let (range, outcome) = if event.delta_x != 0.0 || (event.delta_y != 0.0 && event.shift) {
            let delta = if event.delta_x != 0.0 {
                event.delta_x
            } else {
                event.delta_y
            };
            (
                ViewController::pan_range(min_mz, max_mz, delta, wheel.pan_sensitivity),
                GestureOutcome::Panned,
            )
        } else if event.delta_y != 0.0 {
            let width = pane.surface.width;
            let pivot = if width > 0.0 {
                (event.x / width) as f64
            } else {
                0.5
            };
            (
                ViewController::zoom_range_at(
                    min_mz,
                    max_mz,
                    pivot,
                    event.delta_y,
                    wheel.zoom_sensitivity,
                ),
                GestureOutcome::Zoomed,
            )
        } else {
            return GestureOutcome::Ignored;
        };

        if !ctx.zoom(event.pane, range.0, range.1, max_intensity) {
            return GestureOutcome::Ignored;
        }
        ctx.mirror_range(event.pane);
        outcome
    }

    /// Ctrl+0 resets every pane, Ctrl+= and Ctrl+- zoom the m/z axis around its centre.
    pub fn handle_key(&mut self, ctx: &mut GestureContext, event: &KeyEvent) -> GestureOutcome {
        if !event.ctrl {
            return GestureOutcome::Ignored;
        }
        let zoom_in = match event.key.as_str() {
            "0" => {
                let (config, transform) = (ctx.config, ctx.options.y_transform);
                for pane in ctx.panes.iter_mut() {
                    pane.reset_zoom(config, transform);
                }
                self.reset();
                return GestureOutcome::Reset;
            }
            "=" | "+" => true,
            "-" => false,
            _ => return GestureOutcome::Ignored,
        };
        let Some(pane) = ctx.pane(PaneId::First) else {
            return GestureOutcome::Ignored;
        };
        let viewport = &pane.viewport;
        let (min_mz, max_mz) = ViewController::zoom_centered(
            viewport.min_mz,
            viewport.max_mz,
            ctx.config.keyboard_zoom_step,
            zoom_in,
        );
        let max_intensity = viewport.max_intensity;
        if !ctx.zoom(PaneId::First, min_mz, max_mz, max_intensity) {
            return GestureOutcome::Ignored;
        }
        ctx.mirror_range(PaneId::First);
        GestureOutcome::Zoomed
    }
}

fn empty_rect(pane: PaneId, left: f32, linked: bool) -> SelectionRect {
    SelectionRect {
        pane,
        left,
        width: 0.0,
        offset_y: 0.0,
        height: 0.0,
        anchor: VerticalAnchor::for_pane(pane),
        linked,
    }
}

/// Distance of `y` from the anchor edge of `pane`, clamped to `[0, height]`.
fn commit_offset(pane: PaneId, y: f32, height: f32) -> f32 {
    let offset = match VerticalAnchor::for_pane(pane) {
        VerticalAnchor::Top => y,
        VerticalAnchor::Bottom => height - y,
    };
    clamp_px(offset, 0.0, height)
}

fn update_selection(selection: &mut Selection, ctx: &GestureContext, x: f32, y: f32) {
    let Some(pane) = ctx.pane(selection.pane) else {
        return;
    };
    let surface = pane.surface;
    let offset = match selection.rect.anchor {
        VerticalAnchor::Top => y,
        VerticalAnchor::Bottom => surface.height - y,
    };
    let start_x = selection.start_x;
    resize_rect(&mut selection.rect, start_x, x, offset, surface);
    // Same extent in the partner, measured from its own anchor edge.
    if let Some(linked) = selection.linked.as_mut() {
        if let Some(partner) = ctx.pane(linked.pane) {
            resize_rect(linked, start_x, x, offset, partner.surface);
        }
    }
}

fn resize_rect(rect: &mut SelectionRect, start_x: f32, x: f32, offset: f32, surface: Surface) {
    let x = clamp_px(x, 0.0, surface.width);
    let start_x = clamp_px(start_x, 0.0, surface.width);
    rect.left = start_x.min(x);
    rect.width = (x - start_x).abs();
    rect.offset_y = clamp_px(offset, 1.0, surface.height);
    rect.height = (surface.height - rect.offset_y).max(0.0);
}
