use knap_structs::core::OutputData;
use std::fmt::{self, Write};

fn counters(output: &OutputData) -> [(&'static str, Option<&u64>); 5] {
    let d = &output.diagnostics;
    [
        ("Number of recursive calls", d.recursive_calls()),
        ("Number of memoized lookups", d.memo_hits()),
        ("Number of unit items", d.unit_items()),
        ("Number of candidate evaluations", d.candidate_evaluations()),
        ("Number of table improvements", d.improvements()),
    ]
}

/// Renders solver outputs as the plain-text report written to the console and
/// the result file.
pub fn render_report(file_name: &str, capacity: i64, outputs: &[OutputData]) -> String {
    let mut ret = String::new();
    write_report(&mut ret, file_name, capacity, outputs)
        .map(|_| ret)
        .unwrap_or_default()
}

fn write_report(
    ret: &mut String,
    file_name: &str,
    capacity: i64,
    outputs: &[OutputData],
) -> fmt::Result {
    writeln!(ret, "File used: {}", file_name)?;
    writeln!(ret, "Maximum weight for knapsack: {}", capacity)?;
    for output in outputs {
        writeln!(ret, "----")?;
        writeln!(ret, "As calculated by the {} algorithm: ", output.algorithm)?;
        writeln!(ret, "Total weight of solution: {}", output.selection.total_weight())?;
        writeln!(ret, "Total value of solution: {}", output.selection.total_value())?;
        for (label, count) in counters(output) {
            if let Some(count) = count {
                writeln!(ret, "{}: {}", label, count)?;
            }
        }
        writeln!(ret, "Set of items chosen and their quantity: ")?;
        writeln!(ret, "--")?;
        for (name, quantity) in output.selection.items() {
            writeln!(ret, "{} : {}", name, quantity)?;
        }
    }
    Ok(())
}
