use knap_challenges::knapsack::Item;
use knap_structs::{
    config::RuntimeConfig,
    core::{Diagnostics, OutputData, Selection},
};
use serde_json::json;

#[test]
fn test_runtime_config_defaults() {
    let config: RuntimeConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, RuntimeConfig::default());
    assert_eq!(config.algorithms, vec!["recursive", "dynamic"]);
    assert!(config.write_report_file);
    assert!(config.cross_check);
    assert!(config.hyperparameters().is_none());
}

#[test]
fn test_runtime_config_hyperparameters() {
    let config: RuntimeConfig = serde_json::from_value(json!({
        "algorithms": ["recursive", "greedy"],
        "hyperparameters": { "recursive": { "max_units": 5 } },
        "cross_check": false
    }))
    .unwrap();
    assert_eq!(
        config.hyperparameters_for("recursive"),
        json!({ "max_units": 5 }).as_object().cloned()
    );
    assert_eq!(config.hyperparameters_for("dynamic"), None);
    assert_eq!(config.unknown_algorithms(), vec!["greedy"]);
    assert!(!config.cross_check);
    assert!(config.write_report_file);
}

#[test]
fn test_output_data_skips_missing_counters() {
    let mut selection = Selection::new();
    selection.add_item(&Item::new("A", 5, 10, 2), 2);
    let output = OutputData {
        algorithm: "recursive".to_string(),
        selection,
        diagnostics: Diagnostics::recursive(31, 4, 5),
    };
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(
        value["diagnostics"],
        json!({ "recursive_calls": 31, "memo_hits": 4, "unit_items": 5 })
    );
    assert_eq!(value["selection"]["items"], json!({ "A": 2 }));
    assert_eq!(output.diagnostics.recursive_calls(), Some(&31));
    assert_eq!(output.diagnostics.candidate_evaluations(), None);

    let back: OutputData = serde_json::from_value(value).unwrap();
    assert_eq!(back, output);
}
