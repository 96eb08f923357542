//! Ordered threshold tables shared by the distance and radius classifiers

/// Step function over `f64` built from `(upper_bound, label)` rungs
///
/// Rungs are half-open `[previous_upper, upper)`; a value equal to a
/// bound falls into the next rung. Values at or past the last bound map
/// to `top`.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdLadder<T: 'static> {
    rungs: &'static [(f64, T)],
    top: T,
}

impl<T: Copy> ThresholdLadder<T> {
    /// Rung bounds must be strictly increasing
    pub const fn new(rungs: &'static [(f64, T)], top: T) -> Self {
        Self { rungs, top }
    }

    /// Label for `value`
    pub fn classify(&self, value: f64) -> T {
        self.rungs
            .iter()
            .find(|(upper, _)| value < *upper)
            .map(|(_, label)| *label)
            .unwrap_or(self.top)
    }

    pub fn bounds(&self) -> impl Iterator<Item = f64> + '_ {
        self.rungs.iter().map(|(upper, _)| *upper)
    }
}
