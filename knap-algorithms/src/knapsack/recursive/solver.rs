use super::{params::Params, tables::Tables};
use knap_challenges::{knapsack::*, KnapsackError, Result};
use log::debug;
use logging_timer::time;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Calls into the memoized recursion, base cases and table hits included
    pub recursive_calls: u64,
    /// Calls answered from the value table
    pub memo_hits: u64,
    /// Unit items after expanding quantities
    pub unit_items: u64,
}

#[derive(Clone, Copy)]
struct UnitItem<'a> {
    item: &'a Item,
    weight: usize,
}

struct Recursion<'a> {
    units: Vec<UnitItem<'a>>,
    tables: Tables,
    stats: Stats,
}

impl<'a> Recursion<'a> {
    fn new(challenge: &'a Challenge, capacity: usize) -> Self {
        let units: Vec<UnitItem<'a>> = challenge
            .items
            .iter()
            .flat_map(|item| std::iter::repeat(item).take(item.quantity() as usize))
            .map(|item| UnitItem {
                item,
                weight: usize::try_from(item.weight()).unwrap_or(usize::MAX),
            })
            .collect();
        let tables = Tables::new(units.len(), capacity);
        let stats = Stats {
            unit_items: units.len() as u64,
            ..Stats::default()
        };
        Self {
            units,
            tables,
            stats,
        }
    }

    /// Best value reachable with the first `n` unit items within capacity `w`.
    fn solve(&mut self, n: usize, w: usize) -> i64 {
        self.stats.recursive_calls += 1;
        if n == 0 || w == 0 {
            return 0;
        }
        if let Some(value) = self.tables.best(n, w) {
            self.stats.memo_hits += 1;
            return value;
        }

        let UnitItem { item, weight } = self.units[n - 1];
        let (value, keep) = if weight > w {
            (self.solve(n - 1, w), false)
        } else {
            let take = self.solve(n - 1, w - weight) + item.value();
            let dont_take = self.solve(n - 1, w);
            if take > dont_take {
                (take, true)
            } else {
                (dont_take, false)
            }
        };
        self.tables.record(n, w, value, keep);
        value
    }

    /// Walks the keep table from the last unit back to the first.
    fn backtrack(&self, capacity: usize) -> Selection {
        let mut selection = Selection::new();
        let mut w = capacity;
        for n in (1..=self.units.len()).rev() {
            if self.tables.keep(n, w) {
                let unit = self.units[n - 1];
                selection.add_item(unit.item, 1);
                w -= unit.weight;
            }
        }
        selection
    }
}

pub struct Solver;

impl Solver {
    /// Reduces the bounded problem to 0/1 by expanding every item into
    /// `quantity` unit items, solves it with memoized recursion and rebuilds
    /// the selection from the keep table.
    ///
    /// Taking a unit requires a strictly better value than leaving it, so on
    /// ties the later unit is left out.
    ///
    /// Recursion depth is one frame per unit item, which `Params::max_units`
    /// bounds.
    #[time]
    pub fn solve(challenge: &Challenge, params: &Params) -> Result<(Selection, Stats)> {
        let capacity = challenge.validate()?;

        let units = challenge.num_units();
        if units > params.max_units {
            return Err(KnapsackError::UnitBudgetExceeded {
                units,
                limit: params.max_units,
            });
        }
        let cells = (units + 1)
            .checked_mul(capacity as u64 + 1)
            .unwrap_or(u64::MAX);
        if cells > params.max_table_cells {
            return Err(KnapsackError::BudgetExceeded {
                cells,
                limit: params.max_table_cells,
            });
        }

        let mut recursion = Recursion::new(challenge, capacity);
        let best = recursion.solve(recursion.units.len(), capacity);
        let selection = recursion.backtrack(capacity);
        debug_assert_eq!(selection.total_value(), best);

        let stats = recursion.stats;
        debug!(
            "recursive: capacity {} units {} -> value {} weight {} ({} calls, {} memo hits)",
            capacity,
            stats.unit_items,
            selection.total_value(),
            selection.total_weight(),
            stats.recursive_calls,
            stats.memo_hits
        );
        Ok((selection, stats))
    }
}
