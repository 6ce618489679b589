use anyhow::Result;
use serde_json::{Map, Value};
mod params;
mod solver;
mod tables;
pub use params::Params;
pub use solver::{Solver, Stats};
use knap_challenges::knapsack::*;

pub fn solve_challenge(
    challenge: &Challenge,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<(Selection, Stats)> {
    let params = Params::initialize(hyperparameters);
    Ok(Solver::solve(challenge, &params)?)
}
