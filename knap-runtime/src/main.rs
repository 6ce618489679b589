use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use knap_algorithms::knapsack::{dynamic, recursive};
use knap_challenges::knapsack::{Challenge, Selection, Track};
use knap_structs::{
    config::{RuntimeConfig, ALGORITHMS},
    core::{Diagnostics, OutputData},
};
use knap_utils::{jsonify, load_json_arg, parse_catalog, render_report, write_catalog};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn cli() -> Command {
    Command::new("knap-runtime")
        .about("Solves, verifies or generates bounded knapsack instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compute_solution")
                .about("Solves a catalog with the recursive and dynamic algorithms")
                .arg(
                    arg!(<CATALOG> "Path to a catalog file, one 'name weight value quantity' per line")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<CAPACITY> "Maximum total weight")
                        .value_parser(clap::value_parser!(i64))
                        .allow_negative_numbers(true),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "Which algorithm to run: recursive, dynamic or both")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--config [CONFIG] "Runtime config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--"no-file" "Do not write the <CATALOG>_result.txt report file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--json "Print one json output record per algorithm instead of the report")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a selection against a catalog")
                .arg(
                    arg!(<CATALOG> "Path to a catalog file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<CAPACITY> "Maximum total weight")
                        .value_parser(clap::value_parser!(i64))
                        .allow_negative_numbers(true),
                )
                .arg(
                    arg!(<SOLUTION> "Selection json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate_catalog")
                .about("Generates a random catalog")
                .arg(arg!(<SEED> "Seed value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(<TRACK> "Track string, e.g. n_items=20,budget=30")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the catalog is written to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("compute_solution", sub_m)) => compute_solution(
            sub_m.get_one::<PathBuf>("CATALOG").unwrap().clone(),
            *sub_m.get_one::<i64>("CAPACITY").unwrap(),
            sub_m.get_one::<String>("algorithm").cloned(),
            sub_m.get_one::<String>("config").cloned(),
            sub_m.get_flag("no-file"),
            sub_m.get_flag("json"),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<PathBuf>("CATALOG").unwrap().clone(),
            *sub_m.get_one::<i64>("CAPACITY").unwrap(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate_catalog", sub_m)) => generate_catalog(
            *sub_m.get_one::<u64>("SEED").unwrap(),
            sub_m.get_one::<String>("TRACK").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn compute_solution(
    catalog_path: PathBuf,
    capacity: i64,
    algorithm: Option<String>,
    config: Option<String>,
    no_file: bool,
    json: bool,
) -> Result<()> {
    let mut config = match config {
        Some(config) => load_json_arg::<RuntimeConfig>(&config)?,
        None => RuntimeConfig::default(),
    };
    if let Some(algorithm) = algorithm {
        config.algorithms = select_algorithms(&algorithm);
    }
    let unknown = config.unknown_algorithms();
    if !unknown.is_empty() {
        return Err(anyhow!("Unsupported algorithm(s): {}", unknown.join(", ")));
    }

    let challenge = load_challenge(&catalog_path, capacity)?;
    let outputs = config
        .algorithms
        .iter()
        .map(|algorithm| run_algorithm(algorithm, &challenge, &config))
        .collect::<Result<Vec<_>>>()?;

    if json {
        for output in &outputs {
            println!("{}", jsonify(output));
        }
    } else {
        let file_name = catalog_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let report = render_report(&file_name, capacity, &outputs);
        print!("{}", report);
        if config.write_report_file && !no_file {
            let path = result_path(&catalog_path);
            fs::write(&path, &report)
                .map_err(|e| anyhow!("Failed to write report {}: {}", path.display(), e))?;
            info!("Report written to {}", path.display());
        }
    }

    if config.cross_check {
        cross_check(&outputs)?;
    }
    Ok(())
}

pub fn verify_solution(catalog_path: PathBuf, capacity: i64, solution: String) -> Result<()> {
    let challenge = load_challenge(&catalog_path, capacity)?;
    let selection = load_json_arg::<Selection>(&solution)?;
    match challenge.evaluate_selection(&selection) {
        Ok(total_value) => {
            println!("Solution is valid (total value {})", total_value);
            Ok(())
        }
        Err(e) => Err(anyhow!("Invalid solution: {}", e)),
    }
}

pub fn generate_catalog(seed: u64, track: String, output_file: Option<PathBuf>) -> Result<()> {
    let track = track.parse::<Track>()?;
    let challenge = Challenge::generate_instance(&expand_seed(seed), &track)?;
    let catalog = write_catalog(&challenge.items);
    match output_file {
        Some(path) => {
            fs::write(&path, catalog)?;
            println!("catalog written to: {:?}", path);
        }
        None => print!("{}", catalog),
    }
    eprintln!("Suggested capacity: {}", challenge.capacity);
    Ok(())
}

fn select_algorithms(algorithm: &str) -> Vec<String> {
    match algorithm {
        "both" => ALGORITHMS.iter().map(|a| a.to_string()).collect(),
        other => vec![other.to_string()],
    }
}

fn load_challenge(catalog_path: &Path, capacity: i64) -> Result<Challenge> {
    let content = fs::read_to_string(catalog_path)
        .map_err(|e| anyhow!("Failed to read catalog {}: {}", catalog_path.display(), e))?;
    let items = parse_catalog(&content)?;
    info!(
        "Loaded {} items from {}",
        items.len(),
        catalog_path.display()
    );
    Ok(Challenge::new(capacity, items))
}

fn run_algorithm(
    algorithm: &str,
    challenge: &Challenge,
    config: &RuntimeConfig,
) -> Result<OutputData> {
    let hyperparameters = config.hyperparameters_for(algorithm);
    let (selection, diagnostics) = match algorithm {
        "dynamic" => {
            let (selection, stats) = dynamic::solve_challenge(challenge, &hyperparameters)?;
            (
                selection,
                Diagnostics::dynamic(stats.candidate_evaluations, stats.improvements),
            )
        }
        "recursive" => {
            let (selection, stats) = recursive::solve_challenge(challenge, &hyperparameters)?;
            (
                selection,
                Diagnostics::recursive(stats.recursive_calls, stats.memo_hits, stats.unit_items),
            )
        }
        _ => return Err(anyhow!("Unsupported algorithm '{}'", algorithm)),
    };
    info!(
        "{}: total value {}, total weight {}",
        algorithm,
        selection.total_value(),
        selection.total_weight()
    );
    Ok(OutputData {
        algorithm: algorithm.to_string(),
        selection,
        diagnostics,
    })
}

fn cross_check(outputs: &[OutputData]) -> Result<()> {
    for pair in outputs.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.selection.total_value() != b.selection.total_value() {
            return Err(anyhow!(
                "Algorithms disagree: {} found value {} but {} found value {}",
                a.algorithm,
                a.selection.total_value(),
                b.algorithm,
                b.selection.total_value()
            ));
        }
    }
    if outputs.len() < 2 {
        warn!("Cross check skipped, fewer than two algorithms ran");
    }
    Ok(())
}

fn result_path(catalog_path: &Path) -> PathBuf {
    let stem = catalog_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    catalog_path.with_file_name(format!("{}_result.txt", stem))
}

fn expand_seed(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for chunk in bytes.chunks_mut(8) {
        chunk.copy_from_slice(&seed.to_le_bytes());
    }
    bytes
}
