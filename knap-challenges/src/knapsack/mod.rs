use crate::{KnapsackError, Result};
use anyhow::anyhow;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

impl_kv_string_serde! {
    Track {
        n_items: usize,
        budget: u32,
    }
}

/// A single item type: every unit weighs `weight` and is worth `value`, with at
/// most `quantity` units available.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    weight: i64,
    value: i64,
    quantity: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, weight: i64, value: i64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            weight,
            value,
            quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn validate(&self, index: usize) -> Result<()> {
        let reason = if self.weight <= 0 {
            format!("weight ({}) must be positive", self.weight)
        } else if self.value < 0 {
            format!("value ({}) must not be negative", self.value)
        } else if self.quantity < 0 {
            format!("quantity ({}) must not be negative", self.quantity)
        } else {
            return Ok(());
        };
        Err(KnapsackError::InvalidItem {
            index,
            name: self.name.clone(),
            reason,
        })
    }
}

// Same layout as a catalog line
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.weight, self.value, self.quantity
        )
    }
}

/// Chosen quantities keyed by item name, together with the total weight and
/// value of everything chosen.
///
/// Names iterate in sorted order so reports and serialised output are stable.
/// The only way to grow a selection is [`Selection::add_item`], which keeps the
/// totals in step with the mapping.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: BTreeMap<String, i64>,
    total_weight: i64,
    total_value: i64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: &Item, quantity: i64) {
        debug_assert!(quantity >= 0, "selections never shrink");
        if quantity == 0 {
            return;
        }
        *self.items.entry(item.name.clone()).or_insert(0) += quantity;
        self.total_weight += quantity * item.weight;
        self.total_value += quantity * item.value;
    }

    pub fn items(&self) -> &BTreeMap<String, i64> {
        &self.items
    }

    pub fn quantity_of(&self, name: &str) -> i64 {
        self.items.get(name).copied().unwrap_or(0)
    }

    pub fn total_weight(&self) -> i64 {
        self.total_weight
    }

    pub fn total_value(&self) -> i64 {
        self.total_value
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub capacity: i64,
    pub items: Vec<Item>,
}

impl Challenge {
    pub fn new(capacity: i64, items: Vec<Item>) -> Self {
        Self { capacity, items }
    }

    /// Rejects a negative capacity, a malformed item, or a catalog whose total
    /// weight or value (every unit taken) does not fit an `i64`. On success
    /// returns the capacity as a table index.
    pub fn validate(&self) -> Result<usize> {
        let capacity = usize::try_from(self.capacity)
            .ok()
            .filter(|&c| c < usize::MAX)
            .ok_or(KnapsackError::CapacityOverflow {
                capacity: self.capacity,
            })?;
        for (index, item) in self.items.iter().enumerate() {
            item.validate(index)?;
        }
        self.checked_total("weight", |item| item.weight)?;
        self.checked_total("value", |item| item.value)?;
        Ok(capacity)
    }

    // Every partial sum a solver forms is bounded by these totals.
    fn checked_total(&self, total: &str, field: impl Fn(&Item) -> i64) -> Result<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| {
                item.quantity
                    .checked_mul(field(item))
                    .and_then(|t| acc.checked_add(t))
            })
            .ok_or_else(|| KnapsackError::TotalOverflow {
                total: total.to_string(),
            })
    }

    /// Number of unit items after expanding every quantity.
    pub fn num_units(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.quantity.max(0) as u64)
            .sum()
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> anyhow::Result<Self> {
        if track.budget > 100 {
            return Err(anyhow!(
                "Budget ({}) must be a percentage between 0 and 100",
                track.budget
            ));
        }
        let mut rng = SmallRng::from_seed(seed.clone());
        let density = 0.8;

        let items: Vec<Item> = (0..track.n_items)
            .map(|i| {
                let weight = rng.gen_range(1..=50);
                let value = if rng.gen_bool(density) {
                    rng.gen_range(1..=100)
                } else {
                    0
                };
                let quantity = rng.gen_range(0..=5);
                Item::new(format!("item_{}", i), weight, value, quantity)
            })
            .collect();

        let total_weight: i64 = items.iter().map(|item| item.weight * item.quantity).sum();
        let capacity = (track.budget as f64 / 100.0 * total_weight as f64) as i64;

        Ok(Challenge { capacity, items })
    }

    /// Checks that `selection` could have been drawn from this catalog and
    /// returns its total value.
    ///
    /// Totals are recomputed for names whose records agree on weight and value.
    /// When several records share a name but differ, only the quantity cap and
    /// the capacity are enforced.
    pub fn evaluate_selection(&self, selection: &Selection) -> Result<i64> {
        self.validate()?;

        let mut available: HashMap<&str, i64> = HashMap::new();
        let mut unit: HashMap<&str, Option<(i64, i64)>> = HashMap::new();
        for item in &self.items {
            *available.entry(item.name()).or_insert(0) += item.quantity;
            let this_unit = Some((item.weight, item.value));
            unit.entry(item.name())
                .and_modify(|u| {
                    if *u != this_unit {
                        *u = None;
                    }
                })
                .or_insert(this_unit);
        }

        let mut expected = Some((0i64, 0i64));
        for (name, &quantity) in selection.items() {
            let cap = *available.get(name.as_str()).ok_or_else(|| {
                KnapsackError::InvalidSelection(format!("Item '{}' is not in the catalog", name))
            })?;
            if quantity <= 0 {
                return Err(KnapsackError::InvalidSelection(format!(
                    "Item '{}' has non-positive quantity ({})",
                    name, quantity
                )));
            }
            if quantity > cap {
                return Err(KnapsackError::InvalidSelection(format!(
                    "Item '{}' chosen {} times but only {} available",
                    name, quantity, cap
                )));
            }
            expected = match (expected, unit.get(name.as_str()).copied().flatten()) {
                (Some((w, v)), Some((uw, uv))) => Some((w + quantity * uw, v + quantity * uv)),
                _ => None,
            };
        }

        if selection.total_weight() > self.capacity {
            return Err(KnapsackError::InvalidSelection(format!(
                "Total weight ({}) exceeded capacity ({})",
                selection.total_weight(),
                self.capacity
            )));
        }
        if let Some((weight, value)) = expected {
            if weight != selection.total_weight() || value != selection.total_value() {
                return Err(KnapsackError::InvalidSelection(format!(
                    "Totals (weight {}, value {}) do not match chosen items (weight {}, value {})",
                    selection.total_weight(),
                    selection.total_value(),
                    weight,
                    value
                )));
            }
        }
        Ok(selection.total_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Challenge {
        Challenge::new(
            10,
            vec![Item::new("A", 5, 10, 2), Item::new("B", 4, 7, 3)],
        )
    }

    #[test]
    fn test_add_item_merges_by_name() {
        let mut selection = Selection::new();
        selection.add_item(&Item::new("A", 2, 3, 5), 2);
        selection.add_item(&Item::new("A", 2, 3, 5), 1);
        selection.add_item(&Item::new("B", 1, 1, 1), 1);
        assert_eq!(selection.quantity_of("A"), 3);
        assert_eq!(selection.quantity_of("B"), 1);
        assert_eq!(selection.items().len(), 2);
        assert_eq!(selection.total_weight(), 7);
        assert_eq!(selection.total_value(), 10);
    }

    #[test]
    fn test_selection_clone_is_independent() {
        let item = Item::new("A", 2, 3, 5);
        let mut original = Selection::new();
        original.add_item(&item, 1);
        let mut copy = original.clone();
        copy.add_item(&item, 2);
        assert_eq!(original.quantity_of("A"), 1);
        assert_eq!(original.total_value(), 3);
        assert_eq!(copy.quantity_of("A"), 3);
        assert_eq!(copy.total_value(), 9);
    }

    #[test]
    fn test_zero_quantity_leaves_selection_empty() {
        let mut selection = Selection::new();
        selection.add_item(&Item::new("A", 2, 3, 5), 0);
        assert!(selection.is_empty());
        assert_eq!(selection.total_weight(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_items() {
        for (item, index) in [
            (Item::new("zero", 0, 1, 1), 1),
            (Item::new("neg_value", 1, -1, 1), 1),
            (Item::new("neg_qty", 1, 1, -1), 1),
        ] {
            let challenge = Challenge::new(5, vec![Item::new("ok", 1, 1, 1), item.clone()]);
            match challenge.validate() {
                Err(KnapsackError::InvalidItem { index: i, name, .. }) => {
                    assert_eq!(i, index);
                    assert_eq!(name, item.name());
                }
                other => panic!("expected InvalidItem, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_negative_capacity() {
        let challenge = Challenge::new(-1, vec![Item::new("A", 1, 1, 1)]);
        assert_eq!(
            challenge.validate(),
            Err(KnapsackError::CapacityOverflow { capacity: -1 })
        );
    }

    #[test]
    fn test_validate_checks_capacity_before_items() {
        let challenge = Challenge::new(-3, vec![Item::new("A", 0, 1, 1)]);
        assert!(matches!(
            challenge.validate(),
            Err(KnapsackError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overflowing_totals() {
        let challenge = Challenge::new(2, vec![Item::new("A", 1, i64::MAX / 2 + 1, 2)]);
        assert_eq!(
            challenge.validate(),
            Err(KnapsackError::TotalOverflow {
                total: "value".to_string()
            })
        );

        let challenge = Challenge::new(
            2,
            vec![Item::new("A", i64::MAX, 1, 1), Item::new("B", 1, 1, 1)],
        );
        assert_eq!(
            challenge.validate(),
            Err(KnapsackError::TotalOverflow {
                total: "weight".to_string()
            })
        );

        let challenge = Challenge::new(2, vec![Item::new("A", 1, i64::MAX / 2, 2)]);
        assert!(challenge.validate().is_ok());
    }

    #[test]
    fn test_num_units() {
        assert_eq!(catalog().num_units(), 5);
    }

    #[test]
    fn test_track_kv_string() {
        let track: Track = "n_items=12,budget=40".parse().unwrap();
        assert_eq!(
            track,
            Track {
                n_items: 12,
                budget: 40
            }
        );
        assert_eq!(track.to_string(), "n_items=12,budget=40");
        assert!("n_items=12".parse::<Track>().is_err());
        assert!("n_items=x,budget=1".parse::<Track>().is_err());

        let json = serde_json::to_string(&track).unwrap();
        assert_eq!(json, "\"n_items=12,budget=40\"");
        let back: Track = serde_json::from_str(&json).unwrap();
        assert_eq!(back, track);
    }

    #[test]
    fn test_generate_instance_is_deterministic() {
        let track = Track {
            n_items: 20,
            budget: 30,
        };
        let a = Challenge::generate_instance(&[7u8; 32], &track).unwrap();
        let b = Challenge::generate_instance(&[7u8; 32], &track).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.items.len(), 20);
        assert!(a.validate().is_ok());
        let total: i64 = a.items.iter().map(|i| i.weight() * i.quantity()).sum();
        assert!(a.capacity <= total);
    }

    #[test]
    fn test_generate_instance_rejects_budget_over_100() {
        let track = Track {
            n_items: 5,
            budget: 101,
        };
        assert!(Challenge::generate_instance(&[0u8; 32], &track).is_err());
    }

    #[test]
    fn test_evaluate_selection() {
        let challenge = catalog();
        let mut selection = Selection::new();
        selection.add_item(&challenge.items[0], 2);
        assert_eq!(challenge.evaluate_selection(&selection), Ok(20));
    }

    #[test]
    fn test_evaluate_selection_rejects_over_quantity() {
        let challenge = Challenge::new(100, vec![Item::new("A", 5, 10, 2)]);
        let mut selection = Selection::new();
        selection.add_item(&challenge.items[0], 3);
        assert!(matches!(
            challenge.evaluate_selection(&selection),
            Err(KnapsackError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_evaluate_selection_rejects_over_capacity() {
        let challenge = catalog();
        let mut selection = Selection::new();
        selection.add_item(&challenge.items[0], 1);
        selection.add_item(&challenge.items[1], 2);
        assert!(matches!(
            challenge.evaluate_selection(&selection),
            Err(KnapsackError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_evaluate_selection_rejects_unknown_name() {
        let challenge = catalog();
        let mut selection = Selection::new();
        selection.add_item(&Item::new("C", 1, 1, 1), 1);
        assert!(challenge.evaluate_selection(&selection).is_err());
    }

    #[test]
    fn test_evaluate_selection_rejects_tampered_totals() {
        let challenge = catalog();
        let selection: Selection = serde_json::from_str(
            r#"{"items":{"A":1},"total_weight":5,"total_value":99}"#,
        )
        .unwrap();
        assert!(challenge.evaluate_selection(&selection).is_err());
    }

    #[test]
    fn test_evaluate_selection_duplicate_names_share_cap() {
        let challenge = Challenge::new(
            20,
            vec![Item::new("A", 2, 3, 1), Item::new("A", 4, 1, 1)],
        );
        let mut selection = Selection::new();
        selection.add_item(&challenge.items[0], 1);
        selection.add_item(&challenge.items[1], 1);
        assert_eq!(challenge.evaluate_selection(&selection), Ok(4));
    }
}
