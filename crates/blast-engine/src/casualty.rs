//! Before/after person count comparison

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Casualty delta between the before and after images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasualtySummary {
    pub people_before: usize,
    pub people_visible_after: usize,
    /// `people_before - people_visible_after`, not clamped
    pub people_lost: i64,
}

impl CasualtySummary {
    pub fn compare(people_before: usize, people_visible_after: usize) -> Self {
        let people_lost = people_before as i64 - people_visible_after as i64;
        if people_lost < 0 {
            warn!(
                people_before,
                people_visible_after, "More people visible after the blast than before"
            );
        }

        Self {
            people_before,
            people_visible_after,
            people_lost,
        }
    }
}
