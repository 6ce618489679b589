use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Largest capacity the weight table may be sized for
    pub max_capacity: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_capacity: 10_000_000,
        }
    }
}

impl Params {
    pub fn initialize(h: &Option<Map<String, Value>>) -> Self {
        let mut p = Self::default();
        if let Some(m) = h {
            if let Some(v) = m.get("max_capacity").and_then(|v| v.as_u64()) {
                p.max_capacity = v as usize;
            }
        }
        p
    }
}
