use knap_challenges::knapsack::{Item, Selection};
use knap_structs::core::{Diagnostics, OutputData};
use knap_utils::render_report;

#[test]
fn test_render_report() {
    let a = Item::new("A", 5, 10, 2);
    let b = Item::new("B", 1, 1, 1);
    let mut selection = Selection::new();
    selection.add_item(&b, 1);
    selection.add_item(&a, 1);

    let outputs = vec![
        OutputData {
            algorithm: "recursive".to_string(),
            selection: selection.clone(),
            diagnostics: Diagnostics::recursive(9, 1, 3),
        },
        OutputData {
            algorithm: "dynamic".to_string(),
            selection,
            diagnostics: Diagnostics::dynamic(4, 2),
        },
    ];

    let expected = "\
File used: items.txt
Maximum weight for knapsack: 6
----
As calculated by the recursive algorithm: 
Total weight of solution: 6
Total value of solution: 11
Number of recursive calls: 9
Number of memoized lookups: 1
Number of unit items: 3
Set of items chosen and their quantity: 
--
A : 1
B : 1
----
As calculated by the dynamic algorithm: 
Total weight of solution: 6
Total value of solution: 11
Number of candidate evaluations: 4
Number of table improvements: 2
Set of items chosen and their quantity: 
--
A : 1
B : 1
";
    assert_eq!(render_report("items.txt", 6, &outputs), expected);
}

#[test]
fn test_render_report_without_outputs() {
    assert_eq!(
        render_report("empty.txt", 0, &[]),
        "File used: empty.txt\nMaximum weight for knapsack: 0\n"
    );
}
