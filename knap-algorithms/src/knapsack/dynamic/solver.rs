use super::params::Params;
use knap_challenges::{knapsack::*, KnapsackError, Result};
use log::debug;
use logging_timer::time;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of (weight, repeat count) pairs compared against the table
    pub candidate_evaluations: u64,
    /// Number of times a table slot was replaced by a better selection
    pub improvements: u64,
}

pub struct Solver;

impl Solver {
    /// Bundled bounded-knapsack DP over a table of best selections per weight.
    ///
    /// Slot `w` holds the best selection found so far whose weight is at most
    /// `w`. Item types are folded in catalog order; for each one the weight
    /// index runs from `capacity` down to the item's weight, and every repeat
    /// count `q` that fits is tried against slot `w - q * weight`. Those lower
    /// slots have not yet seen the current item, so no item exceeds its
    /// quantity. Replacement needs a strictly higher value, so ties keep the
    /// earlier item, the smaller `q`, or the existing slot.
    #[time]
    pub fn solve(challenge: &Challenge, params: &Params) -> Result<(Selection, Stats)> {
        let capacity = challenge.validate()?;
        if capacity > params.max_capacity {
            return Err(KnapsackError::BudgetExceeded {
                cells: capacity as u64 + 1,
                limit: params.max_capacity as u64 + 1,
            });
        }

        let mut best_for_weight = vec![Selection::new(); capacity + 1];
        let mut stats = Stats::default();

        for item in &challenge.items {
            let weight = usize::try_from(item.weight()).unwrap_or(usize::MAX);
            let quantity = usize::try_from(item.quantity()).unwrap_or(usize::MAX);
            // empty when the item is heavier than the whole knapsack
            for w in (weight..=capacity).rev() {
                let max_fit = quantity.min(w / weight);
                for q in 1..=max_fit {
                    let remaining = w - q * weight;
                    let candidate =
                        best_for_weight[remaining].total_value() + q as i64 * item.value();
                    stats.candidate_evaluations += 1;
                    if candidate > best_for_weight[w].total_value() {
                        let mut improved = best_for_weight[remaining].clone();
                        improved.add_item(item, q as i64);
                        best_for_weight[w] = improved;
                        stats.improvements += 1;
                    }
                }
            }
        }

        let selection = best_for_weight.swap_remove(capacity);
        debug!(
            "dynamic: capacity {} items {} -> value {} weight {} ({} candidates, {} improvements)",
            capacity,
            challenge.items.len(),
            selection.total_value(),
            selection.total_weight(),
            stats.candidate_evaluations,
            stats.improvements
        );
        Ok((selection, stats))
    }
}
