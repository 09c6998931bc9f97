use super::PaneId;
use crate::utils::number_formatter::distance_label;

/// A measured m/z distance between two peaks.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceAnnotation {
    pub start_mz: f64,
    pub end_mz: f64,
    /// Height at which the annotation is drawn.
    pub intensity: f64,
    pub label: String,
}

impl DistanceAnnotation {
    /// Builds the annotation between two anchors, labelled for the view `[min_mz, max_mz]`.
    pub fn between(
        (mz_a, intensity_a): (f64, f64),
        (mz_b, intensity_b): (f64, f64),
        min_mz: f64,
        max_mz: f64,
    ) -> Self {
        let start_mz = mz_a.min(mz_b);
        let end_mz = mz_a.max(mz_b);
        Self {
            start_mz,
            end_mz,
            intensity: intensity_a.min(intensity_b) / 2.0,
            label: distance_label(max_mz, min_mz, end_mz - start_mz),
        }
    }

    pub fn distance(&self) -> f64 {
        self.end_mz - self.start_mz
    }

    /// Re-derives the label precision after the view changed.
    pub fn relabel(&mut self, min_mz: f64, max_mz: f64) {
        self.label = distance_label(max_mz, min_mz, self.distance());
    }
}

/// Which edge of the pane a selection rectangle grows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Bottom,
}

impl VerticalAnchor {
    pub fn for_pane(pane: PaneId) -> Self {
        match pane {
            PaneId::First => Self::Top,
            PaneId::Second => Self::Bottom,
        }
    }
}

/// Rubber-band preview drawn on one pane, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionRect {
    pub pane: PaneId,
    pub left: f32,
    pub width: f32,
    /// Distance of the rectangle from its anchor edge.
    pub offset_y: f32,
    pub height: f32,
    pub anchor: VerticalAnchor,
    /// Set on the mirrored copy shown in the partner pane.
    pub linked: bool,
}
