use serde::{Deserialize, Serialize};

/// Identifies one of the (at most two) rendered spectra.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneId {
    /// The upper pane, or the only pane in a single spectrum view.
    #[default]
    First,
    /// The lower, mirrored pane.
    Second,
}

impl PaneId {
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    /// The mirrored pane of a linked pair.
    pub fn partner(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terminus {
    N,
    C,
}

/// Fragment class used for colouring, highlighting and error filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IonSeries {
    A,
    B,
    C,
    D,
    V,
    W,
    X,
    Y,
    Z,
    Precursor,
    Immonium,
    Other,
}

impl IonSeries {
    pub fn terminus(self) -> Option<Terminus> {
        match self {
            Self::A | Self::B | Self::C | Self::D | Self::V => Some(Terminus::N),
            Self::W | Self::X | Self::Y | Self::Z => Some(Terminus::C),
            Self::Precursor | Self::Immonium | Self::Other => None,
        }
    }
}

/// The six backbone series the error graph can filter on, in their scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackboneSeries {
    A,
    B,
    C,
    X,
    Y,
    Z,
}

impl BackboneSeries {
    pub const ALL: [BackboneSeries; 6] = [
        BackboneSeries::A,
        BackboneSeries::B,
        BackboneSeries::C,
        BackboneSeries::X,
        BackboneSeries::Y,
        BackboneSeries::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<BackboneSeries> for IonSeries {
    fn from(series: BackboneSeries) -> Self {
        match series {
            BackboneSeries::A => IonSeries::A,
            BackboneSeries::B => IonSeries::B,
            BackboneSeries::C => IonSeries::C,
            BackboneSeries::X => IonSeries::X,
            BackboneSeries::Y => IonSeries::Y,
            BackboneSeries::Z => IonSeries::Z,
        }
    }
}

/// A residue of one of the annotated sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequencePosition {
    /// Index of the annotated sequence; in a mirrored view each pane shows its own.
    pub sequence: usize,
    pub residue: usize,
}

impl SequencePosition {
    pub fn new(sequence: usize, residue: usize) -> Self {
        Self { sequence, residue }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightColour {
    #[default]
    Default,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

/// A peak as handed over by the annotation backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakInput {
    pub mz: f64,
    pub intensity: f64,
    #[serde(default)]
    pub series: Option<IonSeries>,
    #[serde(default)]
    pub position: Option<SequencePosition>,
}

/// Highlight bookkeeping for a single peak.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeakHighlight {
    /// Number of permanent highlight reasons currently applied.
    pub n: u32,
    /// Transient hover/focus emphasis, only ever set while `n == 0`.
    pub hovered: bool,
    pub colour: Option<HighlightColour>,
}

impl PeakHighlight {
    pub fn is_highlighted(&self) -> bool {
        self.n > 0 || self.hovered
    }
}

/// Label flags derived from the current viewport, plus manual overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeakLabels {
    pub show_label: bool,
    pub show_mz: bool,
    /// The peak is taller than the visible intensity range.
    pub cut: bool,
    pub manual_label: Option<bool>,
    pub manual_mz: Option<bool>,
}

impl PeakLabels {
    pub fn label_visible(&self) -> bool {
        self.manual_label.unwrap_or(self.show_label)
    }

    pub fn mz_visible(&self) -> bool {
        self.manual_mz.unwrap_or(self.show_mz)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
    pub series: Option<IonSeries>,
    pub position: Option<SequencePosition>,
    pub highlight: PeakHighlight,
    pub labels: PeakLabels,
}

impl Peak {
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self {
            mz,
            intensity: intensity.max(0.0),
            series: None,
            position: None,
            highlight: PeakHighlight::default(),
            labels: PeakLabels::default(),
        }
    }

    pub fn with_series(mut self, series: IonSeries) -> Self {
        self.series = Some(series);
        self
    }

    pub fn at_position(mut self, position: SequencePosition) -> Self {
        self.position = Some(position);
        self
    }

    /// A peak without an ion series is an unassigned (background) peak.
    pub fn is_assigned(&self) -> bool {
        self.series.is_some()
    }
}

impl From<PeakInput> for Peak {
    fn from(input: PeakInput) -> Self {
        Self {
            series: input.series,
            position: input.position,
            ..Self::new(input.mz, input.intensity)
        }
    }
}
