//! Command-line entry point: runs the search driver against a single
//! instance file, or sweeps a whole directory of them against a quality
//! threshold map.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use anouk_scheduler::io::{instance_file, solution_file};
use anouk_scheduler::search;
use anouk_scheduler::tester;

#[derive(Parser, Debug)]
#[command(about = "Builds a weekly OR/URPA/UCE schedule from an instance file.")]
struct Args {
    /// Path to a single instance file. Requires --solution.
    #[arg(long)]
    exemplar: Option<PathBuf>,

    /// Output path for the solution, written when --exemplar is given.
    #[arg(long)]
    solution: Option<PathBuf>,

    /// Directory of instance files to process in batch mode.
    #[arg(long, default_value = "data/Exemplars/data")]
    input_path: PathBuf,

    /// Directory solutions are written to in batch mode.
    #[arg(long, default_value = "data/Exemplars/solutions")]
    save_path: PathBuf,

    /// `filename: threshold` map used to grade batch-mode solutions.
    #[arg(long, default_value = "data/calidad_minima_all_ejemplares.txt")]
    minimum_quality: PathBuf,
}

fn run_single(exemplar: &Path, solution: &Path) -> ExitCode {
    let text = match fs::read_to_string(exemplar) {
        Ok(t) => t,
        Err(e) => {
            log::error!("failed to read {}: {}", exemplar.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let instance = match instance_file::parse(&text) {
        Ok(i) => i,
        Err(e) => {
            log::error!("failed to parse {}: {}", exemplar.display(), e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "loaded instance {}: {} patients, {} operating rooms",
        exemplar.display(),
        instance.patients.len(),
        instance.operating_rooms.len()
    );

    let (result, _params) = search::run_default(&instance);

    if let Err(e) = solution_file::write(solution, &result) {
        log::error!("failed to write {}: {}", solution.display(), e);
        return ExitCode::FAILURE;
    }

    match verify(exemplar, solution) {
        Ok(report) if report.all_passed() => log::info!("tester: all checks passed"),
        Ok(report) => {
            for check in report.checks.iter().filter(|c| !c.passed) {
                log::warn!("tester check failed: {}", check.message);
            }
        }
        Err(e) => log::warn!("tester could not verify {}: {}", solution.display(), e),
    }

    ExitCode::SUCCESS
}

fn verify(exemplar: &Path, solution: &Path) -> Result<tester::Report, Box<dyn std::error::Error>> {
    let instance_text = fs::read_to_string(exemplar)?;
    let instance = instance_file::parse(&instance_text)?;
    let solution_text = fs::read_to_string(solution)?;
    let parsed = solution_file::parse(&solution_text)?;
    Ok(tester::run(&instance, &parsed)?)
}

fn convert_file_to_dict(path: &Path) -> std::io::Result<HashMap<String, f64>> {
    let text = fs::read_to_string(path)?;
    let mut map = HashMap::new();
    for line in text.lines() {
        if let Some((name, threshold)) = line.split_once(':') {
            if let Ok(value) = threshold.trim().parse::<f64>() {
                map.insert(name.trim().to_string(), value);
            }
        }
    }
    Ok(map)
}

fn run_batch(input_path: &Path, save_path: &Path, minimum_quality: &Path) -> ExitCode {
    let thresholds = match convert_file_to_dict(minimum_quality) {
        Ok(m) => m,
        Err(e) => {
            log::error!("failed to read {}: {}", minimum_quality.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let entries = match fs::read_dir(input_path) {
        Ok(e) => e,
        Err(e) => {
            log::error!("failed to read directory {}: {}", input_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut processed = 0;
    let mut passed_quality = 0;

    for entry in entries.flatten() {
        let exemplar_path = entry.path();
        let name = match exemplar_path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        let text = match fs::read_to_string(&exemplar_path) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("skipping {}: {}", name, e);
                continue;
            }
        };
        let instance = match instance_file::parse(&text) {
            Ok(i) => i,
            Err(e) => {
                log::warn!("skipping {}: {}", name, e);
                continue;
            }
        };

        let (result, _params) = search::run_default(&instance);
        let cost = result.best_value().unwrap_or(0);

        let solution_path = save_path.join(format!("sol_{name}"));
        if let Err(e) = solution_file::write(&solution_path, &result) {
            log::warn!("failed to write solution for {}: {}", name, e);
            continue;
        }

        processed += 1;
        match thresholds.get(&name) {
            Some(&threshold) if cost as f64 >= threshold => {
                passed_quality += 1;
                log::info!("{} --> solution_cost: {} acceptable cost: {}", name, cost, threshold);
            }
            Some(&threshold) => {
                log::info!("{} --> solution_cost: {} acceptable cost: {} (below threshold)", name, cost, threshold);
            }
            None => log::warn!("{} has no declared quality threshold", name),
        }
    }

    log::info!("processed {} instances, {} passed quality threshold", processed, passed_quality);
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match (&args.exemplar, &args.solution) {
        (Some(exemplar), Some(solution)) => run_single(exemplar, solution),
        (None, None) => run_batch(&args.input_path, &args.save_path, &args.minimum_quality),
        _ => {
            log::error!("--exemplar and --solution must be given together");
            ExitCode::FAILURE
        }
    }
}
