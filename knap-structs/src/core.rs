use crate::serializable_struct_with_getters;
pub use knap_challenges::knapsack::Selection;
use serde::{Deserialize, Serialize};

serializable_struct_with_getters! {
    OutputData {
        algorithm: String,
        selection: Selection,
        diagnostics: Diagnostics,
    }
}

// Each solver fills in only the counters it tracks
serializable_struct_with_getters! {
    Diagnostics {
        candidate_evaluations: Option<u64>,
        improvements: Option<u64>,
        recursive_calls: Option<u64>,
        memo_hits: Option<u64>,
        unit_items: Option<u64>,
    }
}

impl Diagnostics {
    pub fn dynamic(candidate_evaluations: u64, improvements: u64) -> Self {
        Self {
            candidate_evaluations: Some(candidate_evaluations),
            improvements: Some(improvements),
            recursive_calls: None,
            memo_hits: None,
            unit_items: None,
        }
    }

    pub fn recursive(recursive_calls: u64, memo_hits: u64, unit_items: u64) -> Self {
        Self {
            candidate_evaluations: None,
            improvements: None,
            recursive_calls: Some(recursive_calls),
            memo_hits: Some(memo_hits),
            unit_items: Some(unit_items),
        }
    }
}
