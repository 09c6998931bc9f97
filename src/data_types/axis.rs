use serde::{Deserialize, Serialize};

/// Tick labels along one axis, kept at a requested count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisTicks {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

impl AxisTicks {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Adds blank ticks at the end or drops them from the front until `count` remain.
    pub fn resize(&mut self, count: usize) {
        if self.labels.len() < count {
            self.labels.resize(count, String::new());
            self.values.resize(count, 0.0);
        } else if self.labels.len() > count {
            let excess = self.labels.len() - count;
            self.labels.drain(..excess);
            self.values.drain(..excess);
        }
    }

    /// Position of tick `i` as a fraction of the axis length.
    pub fn fraction(&self, i: usize) -> f64 {
        if self.labels.len() < 2 {
            return 0.0;
        }
        i as f64 / (self.labels.len() - 1) as f64
    }
}

/// Optional transforms applied to the intensity axis labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisTransform {
    pub sqrt: bool,
    pub percent: bool,
}
