//! Diet adherence summary over a user's meal history.

use serde::Serialize;

use crate::meals::repo_types::Meal;

/// Anything carrying an on-diet flag. `None` means the flag was never recorded.
pub trait DietEntry {
    fn on_diet(&self) -> Option<bool>;
}

impl DietEntry for Meal {
    fn on_diet(&self) -> Option<bool> {
        self.is_on_diet
    }
}

impl DietEntry for bool {
    fn on_diet(&self) -> Option<bool> {
        Some(*self)
    }
}

impl DietEntry for Option<bool> {
    fn on_diet(&self) -> Option<bool> {
        *self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub meals_quantity: u64,
    pub on_diet_meals_quantity: u64,
    pub out_diet_meals_quantity: u64,
    /// Longest run of consecutive on-diet entries.
    pub best_sequence: u64,
    /// Run of on-diet entries ending at the most recent one.
    pub actual_sequence: u64,
}

/// Summarizes `entries`, which must be ordered oldest first.
///
/// The slice is read as given and never re-sorted. Entries without a flag count
/// toward `meals_quantity` only, and break both streaks.
pub fn compute<T: DietEntry>(entries: &[T]) -> Metrics {
    let mut metrics = Metrics {
        meals_quantity: entries.len() as u64,
        ..Metrics::default()
    };

    let mut run = 0u64;
    for entry in entries {
        match entry.on_diet() {
            Some(true) => {
                metrics.on_diet_meals_quantity += 1;
                run += 1;
                metrics.best_sequence = metrics.best_sequence.max(run);
            }
            Some(false) => {
                metrics.out_diet_meals_quantity += 1;
                run = 0;
            }
            None => run = 0,
        }
    }

    metrics.actual_sequence = entries
        .iter()
        .rev()
        .take_while(|e| e.on_diet() == Some(true))
        .count() as u64;

    metrics
}
