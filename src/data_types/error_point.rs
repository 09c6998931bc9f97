use serde::{Deserialize, Serialize};

use super::BackboneSeries;

/// The theoretical ion of one series lying closest to a peak.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosestIon {
    pub value: f64,
    pub fragment: String,
}

/// Mass errors of one peak, as computed by the annotation backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorPoint {
    pub mz: f64,
    /// Error (Da) to the assigned fragment, absent for unassigned peaks.
    #[serde(default)]
    pub assigned_abs: Option<f64>,
    /// Error (ppm) to the assigned fragment, absent for unassigned peaks.
    #[serde(default)]
    pub assigned_rel: Option<f64>,
    #[serde(default)]
    pub unassigned_abs: [Option<ClosestIon>; 6],
    #[serde(default)]
    pub unassigned_rel: [Option<ClosestIon>; 6],
}

impl ErrorPoint {
    pub fn new(mz: f64) -> Self {
        Self {
            mz,
            ..Default::default()
        }
    }

    pub fn with_assigned(mut self, abs: f64, rel: f64) -> Self {
        self.assigned_abs = Some(abs);
        self.assigned_rel = Some(rel);
        self
    }

    pub fn with_closest(
        mut self,
        series: BackboneSeries,
        abs: f64,
        rel: f64,
        fragment: impl Into<String>,
    ) -> Self {
        let fragment = fragment.into();
        self.unassigned_abs[series.index()] = Some(ClosestIon {
            value: abs,
            fragment: fragment.clone(),
        });
        self.unassigned_rel[series.index()] = Some(ClosestIon { value: rel, fragment });
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_rel.is_some()
    }
}
