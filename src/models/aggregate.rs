use std::fmt;

/// Running mean over one group's values. Constant space regardless of
/// how long the group's run is, with output identical to averaging the
/// full value list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `None` until at least one value has been pushed; empty groups
    /// never flush.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// One aggregated output row. Displays as `key<TAB>average` with the
/// average fixed at two decimal places regardless of input precision.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub key: String,
    pub average: f64,
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{:.2}", self.key, self.average)
    }
}
