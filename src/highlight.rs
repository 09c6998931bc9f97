//! Highlight engine
//!
//! Peaks are highlighted through two channels: a temporary one driven by hover/focus
//! and a permanent one driven by clicks. Every peak counts the permanent reasons it is
//! highlighted for (`PeakHighlight::n`), so overlapping groups (an ion series and a
//! sequence position, across both panes) can be switched on and off in any order.
//! Group membership is resolved against the current peaks on every toggle.

use crate::chart_pane::ChartPane;
use crate::data_types::{
    HighlightColour, IonSeries, PaneId, Peak, SequencePosition, Terminus,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

/// A legend entry, residue or pane whose peaks can be highlighted together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightTarget {
    /// All peaks of one ion series, in every pane.
    Series(IonSeries),
    /// All N-terminal fragments (a, b, c, d, v).
    NTerminal,
    /// All C-terminal fragments (w, x, y, z).
    CTerminal,
    /// All peaks explained by one residue, in every pane.
    Position(SequencePosition),
    /// Every peak of a pane.
    Pane(PaneId),
}

impl HighlightTarget {
    pub fn matches(&self, pane: PaneId, peak: &Peak) -> bool {
        match self {
            Self::Series(series) => peak.series == Some(*series),
            Self::NTerminal => peak.series.and_then(IonSeries::terminus) == Some(Terminus::N),
            Self::CTerminal => peak.series.and_then(IonSeries::terminus) == Some(Terminus::C),
            Self::Position(position) => peak.position == Some(*position),
            Self::Pane(id) => *id == pane,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HighlightEngine {
    permanent: HashSet<HighlightTarget>,
    active: bool,
}

impl HighlightEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_permanent(&self, target: &HighlightTarget) -> bool {
        self.permanent.contains(target)
    }

    /// Whether anything is highlighted, used to dim everything else.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Hover/focus highlight. Ignored for targets that are permanently highlighted.
    pub fn hover(&mut self, panes: &mut [ChartPane], target: HighlightTarget, on: bool) {
        self.apply(panes, target, false, on, None);
    }

    /// Sets the permanent state of a target.
    pub fn set_permanent(
        &mut self,
        panes: &mut [ChartPane],
        target: HighlightTarget,
        on: bool,
        colour: Option<HighlightColour>,
    ) {
        self.apply(panes, target, true, on, colour);
    }

    /// A click on a target flips its permanent state.
    pub fn toggle(
        &mut self,
        panes: &mut [ChartPane],
        target: HighlightTarget,
        colour: Option<HighlightColour>,
    ) {
        let on = !self.is_permanent(&target);
        self.apply(panes, target, true, on, colour);
    }

    /// Flips every residue of `sequence` between `from` and `to` (inclusive) to the
    /// opposite of the state of `from`.
    pub fn toggle_range(
        &mut self,
        panes: &mut [ChartPane],
        sequence: usize,
        from: usize,
        to: usize,
        colour: Option<HighlightColour>,
    ) {
        let start = HighlightTarget::Position(SequencePosition::new(sequence, from));
        let on = !self.is_permanent(&start);
        for residue in from.min(to)..=from.max(to) {
            let target = HighlightTarget::Position(SequencePosition::new(sequence, residue));
            self.apply(panes, target, true, on, colour);
        }
    }

    /// Drops every highlight reason on every peak.
    pub fn clear_all(&mut self, panes: &mut [ChartPane]) {
        self.permanent.clear();
        self.active = false;
        for peak in panes.iter_mut().flat_map(|p| p.peaks.iter_mut()) {
            peak.highlight = Default::default();
        }
    }

    fn apply(
        &mut self,
        panes: &mut [ChartPane],
        target: HighlightTarget,
        permanent: bool,
        state: bool,
        colour: Option<HighlightColour>,
    ) {
        let current = self.permanent.contains(&target);
        if permanent {
            if state {
                self.permanent.insert(target);
            } else {
                self.permanent.remove(&target);
            }
        } else if current {
            return;
        }
        let flips = current != state;
        trace!(?target, permanent, state, flips, "highlight toggled");

        for pane in panes.iter_mut() {
            let id = pane.id;
            for peak in pane.peaks.iter_mut().filter(|p| target.matches(id, p)) {
                let highlight = &mut peak.highlight;
                if permanent {
                    if state {
                        if flips {
                            highlight.n += 1;
                        }
                        if colour.is_some() {
                            highlight.colour = colour;
                        }
                    } else {
                        if flips {
                            highlight.n = highlight.n.saturating_sub(1);
                        }
                        if highlight.n == 0 {
                            highlight.hovered = false;
                        }
                        if colour.is_some() || highlight.n == 0 {
                            highlight.colour = None;
                        }
                    }
                } else if highlight.n == 0 {
                    highlight.hovered = state;
                }
            }
        }

        self.active = state || !self.permanent.is_empty();
    }
}
