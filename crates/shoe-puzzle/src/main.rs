//! CLI entry point for the shoe puzzle solver.
//!
//! Usage:
//!   shoe-puzzle solve [options]
//!   shoe-puzzle solve <state.json> [options]
//!   shoe-puzzle solve --stdin [options]
//!
//! Options:
//!   --block <r,c> --red <r,c> --blue <r,c> --black <r,c>
//!                           Start from these piece positions
//!   --json                  Print a JSON report instead of the solution text
//!
//! Without a start state the canonical layout `[(0,0),(2,0),(1,1),(0,2)]` is used.
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use serde::Serialize;

use shoe_puzzle::{breadth_first_search, Position, PuzzleState, SearchOutcome, Step};

#[derive(Parser)]
#[command(name = "shoe-puzzle")]
#[command(about = "Breadth-first solver for the block-and-shoes sliding puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest solution from a start state
    Solve {
        /// Path to a JSON start state
        #[arg(value_name = "FILE", conflicts_with = "stdin")]
        file: Option<PathBuf>,

        /// Read the JSON start state from stdin
        #[arg(long)]
        stdin: bool,

        /// Block position as `row,col`
        #[arg(long, requires_all = ["red", "blue", "black"], conflicts_with_all = ["file", "stdin"])]
        block: Option<Position>,

        /// Red shoe position as `row,col`
        #[arg(long, requires = "block")]
        red: Option<Position>,

        /// Blue shoe position as `row,col`
        #[arg(long, requires = "block")]
        blue: Option<Position>,

        /// Black shoe position as `row,col`
        #[arg(long, requires = "block")]
        black: Option<Position>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

/// Where the start state comes from
enum StartSource {
    Canonical,
    File(PathBuf),
    Stdin,
    Pieces([Position; 4]),
}

/// JSON report of a solve run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveReport {
    solved: bool,
    start: PuzzleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<Step>>,
    states_visited: usize,
    nodes_expanded: usize,
    time_elapsed_ms: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Solve {
            file,
            stdin,
            block,
            red,
            blue,
            black,
            json,
        } => {
            let source = match (file, stdin, block, red, blue, black) {
                (Some(path), _, _, _, _, _) => StartSource::File(path),
                (None, true, _, _, _, _) => StartSource::Stdin,
                (None, false, Some(block), Some(red), Some(blue), Some(black)) => {
                    StartSource::Pieces([block, red, blue, black])
                }
                _ => StartSource::Canonical,
            };
            let start = load_start(source)?;

            let start_time = Instant::now();
            let outcome = breadth_first_search(start);
            let elapsed = start_time.elapsed();

            if json {
                let report = build_report(start, &outcome, elapsed.as_millis() as u64);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_solution(&outcome);
            }

            Ok(if outcome.is_solved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

fn load_start(source: StartSource) -> Result<PuzzleState> {
    match source {
        StartSource::Canonical => {
            info!("using the canonical start state");
            Ok(PuzzleState::default())
        }
        StartSource::File(path) => {
            info!("reading start state from {}", path.display());
            let json = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_start(&json)
        }
        StartSource::Stdin => {
            info!("reading start state from stdin");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            parse_start(&buffer)
        }
        StartSource::Pieces(positions) => {
            info!("using start state from command-line positions");
            PuzzleState::new(&positions).context("invalid start state")
        }
    }
}

fn parse_start(json: &str) -> Result<PuzzleState> {
    serde_json::from_str(json).context("invalid start state JSON")
}

/// Print `Solution:` and one line per node, or `No solution`.
fn print_solution(outcome: &SearchOutcome) {
    match outcome.solution() {
        Some(solution) => {
            println!("Solution:");
            println!("{solution}");
        }
        None => println!("No solution"),
    }
}

fn build_report(start: PuzzleState, outcome: &SearchOutcome, time_elapsed_ms: u64) -> SolveReport {
    let solution = outcome.solution();
    let stats = outcome.stats();
    SolveReport {
        solved: solution.is_some(),
        start,
        moves: solution.as_ref().map(|s| s.len()),
        steps: solution.map(|s| s.steps().to_vec()),
        states_visited: stats.states_visited,
        nodes_expanded: stats.nodes_expanded,
        time_elapsed_ms,
    }
}
