use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Max unit items after expansion. Recursion depth grows with this.
    pub max_units: u64,

    /// Max cells in each of the value and keep tables
    pub max_table_cells: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_units: 4_000,
            max_table_cells: 50_000_000,
        }
    }
}

impl Params {
    pub fn initialize(h: &Option<Map<String, Value>>) -> Self {
        let mut p = Self::default();
        if let Some(m) = h {
            if let Some(v) = m.get("max_units").and_then(|v| v.as_u64()) { p.max_units = v; }
            if let Some(v) = m.get("max_table_cells").and_then(|v| v.as_u64()) { p.max_table_cells = v; }
        }
        p
    }
}
