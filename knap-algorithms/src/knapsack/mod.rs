//! Exact solvers for the bounded knapsack problem.
//!
//! Both solvers take the same [`Challenge`](knap_challenges::knapsack::Challenge)
//! and are fully independent: every call allocates its own tables and drops
//! them before returning, so a solver can be reused or shared across threads.
pub mod dynamic;
pub mod recursive;
