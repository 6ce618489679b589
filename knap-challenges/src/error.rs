use thiserror::Error;

pub type Result<T> = std::result::Result<T, KnapsackError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KnapsackError {
    #[error("Item {index} ({name}) is invalid: {reason}")]
    InvalidItem {
        index: usize,
        name: String,
        reason: String,
    },
    #[error("Capacity ({capacity}) cannot be used as a table index")]
    CapacityOverflow { capacity: i64 },
    #[error("Total {total} of the catalog overflows a 64-bit integer")]
    TotalOverflow { total: String },
    #[error("Expanded catalog has {units} unit items, limit is {limit}")]
    UnitBudgetExceeded { units: u64, limit: u64 },
    #[error("Value table needs {cells} cells, limit is {limit}")]
    BudgetExceeded { cells: u64, limit: u64 },
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
