use knap_challenges::{knapsack::Item, KnapsackError, Result};

/// Parses a catalog with one `name weight value quantity` item per line.
///
/// The three numbers are taken from the end of the line, so names may contain
/// spaces. Blank lines are skipped. Values are not range checked here; that is
/// left to `Challenge::validate`.
pub fn parse_catalog(content: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let parse_err = |reason: String| KnapsackError::Parse {
            line: i + 1,
            reason,
        };
        if fields.len() < 4 {
            return Err(parse_err(format!(
                "expected 'name weight value quantity', got '{}'",
                line.trim()
            )));
        }
        let n = fields.len();
        let number = |field: &str, label: &str| {
            field
                .parse::<i64>()
                .map_err(|e| parse_err(format!("invalid {} '{}': {}", label, field, e)))
        };
        let weight = number(fields[n - 3], "weight")?;
        let value = number(fields[n - 2], "value")?;
        let quantity = number(fields[n - 1], "quantity")?;
        items.push(Item::new(fields[..n - 3].join(" "), weight, value, quantity));
    }
    Ok(items)
}

pub fn write_catalog(items: &[Item]) -> String {
    items.iter().map(|item| format!("{}\n", item)).collect()
}
