use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const ALGORITHMS: [&str; 2] = ["recursive", "dynamic"];

/// Hyperparameter maps keyed by algorithm name
pub type Hyperparameters = HashMap<String, Map<String, Value>>;

fn default_algorithms() -> Vec<String> {
    ALGORITHMS.iter().map(|a| a.to_string()).collect()
}

fn default_true() -> bool {
    true
}

serializable_struct_with_getters! {
    RuntimeConfig {
        #[serde(default = "default_algorithms")]
        algorithms: Vec<String>,
        hyperparameters: Option<Hyperparameters>,
        #[serde(default = "default_true")]
        write_report_file: bool,
        #[serde(default = "default_true")]
        cross_check: bool,
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            algorithms: default_algorithms(),
            hyperparameters: None,
            write_report_file: true,
            cross_check: true,
        }
    }
}

impl RuntimeConfig {
    pub fn hyperparameters_for(&self, algorithm: &str) -> Option<Map<String, Value>> {
        self.hyperparameters
            .as_ref()
            .and_then(|h| h.get(algorithm))
            .cloned()
    }

    pub fn unknown_algorithms(&self) -> Vec<&str> {
        self.algorithms
            .iter()
            .map(|a| a.as_str())
            .filter(|a| !ALGORITHMS.contains(a))
            .collect()
    }
}
