//! CLI entry point for the N-puzzle solver.
//!
//! Usage:
//!   npuzzle-solver solve <board.json> [options]
//!   npuzzle-solver solve --stdin [options]
//!   npuzzle-solver scramble [--seed <n>]
//!
//! A board is a JSON grid of the tile values with `0` for the blank,
//! e.g. `[[1,2,3],[4,0,5],[6,7,8]]`. The solve verdict is printed as
//! JSON; the exit code is 0 when a path was found and 1 otherwise.

mod board;
mod frontier;
mod solver;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use board::Board;
use solver::{solve, SearchOutcome, SolverConfig, SolverResult};

#[derive(Parser)]
#[command(name = "npuzzle-solver")]
#[command(about = "Bounded A* solver for the 3x3 sliding-tile puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find an optimal move sequence for a board
    Solve {
        /// Path to board JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read board from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Maximum node expansions before giving up
        #[arg(long, default_value = "1000000")]
        max_expansions: usize,

        /// Maximum search time in seconds
        #[arg(long, default_value = "15")]
        timeout: u64,

        /// Also render each board of the solution path as text
        #[arg(long)]
        print_boards: bool,
    },
    /// Generate a random solvable board as JSON
    Scramble {
        /// RNG seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Output format for the solve verdict
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Vec<Vec<u8>>>>,
    nodes_expanded: usize,
    nodes_generated: usize,
    peak_frontier: usize,
    time_elapsed_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            max_expansions,
            timeout,
            print_boards,
        } => {
            // Read board JSON
            let json_content = if stdin {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .expect("Failed to read from stdin");
                buffer
            } else if let Some(path) = file {
                fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
            } else {
                eprintln!("Error: Must provide either a file path or --stdin");
                std::process::exit(1);
            };

            // Parse board (validation happens during deserialization)
            let start: Board = match serde_json::from_str(&json_content) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Error parsing board JSON: {}", e);
                    std::process::exit(1);
                }
            };

            let config = SolverConfig {
                max_expansions,
                timeout: Duration::from_secs(timeout),
            };

            let result = solve(start, &config);

            if print_boards {
                if let SearchOutcome::Solved(solution) = &result.outcome {
                    for b in &solution.path {
                        print!("{}", b);
                        println!("--------");
                    }
                }
            }

            let solved = matches!(result.outcome, SearchOutcome::Solved(_));
            let output = format_result(result);
            println!("{}", serde_json::to_string_pretty(&output).unwrap());

            if solved {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Commands::Scramble { seed } => {
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_entropy(),
            };
            let scrambled = Board::scrambled(&mut rng);
            println!("{}", serde_json::to_string(&scrambled).unwrap());
        }
    }
}

fn format_result(result: SolverResult) -> SolveOutput {
    let (solved, reason, moves, path) = match result.outcome {
        SearchOutcome::Solved(solution) => {
            let moves = solution.moves();
            let path = solution
                .path
                .iter()
                .map(|&b| Vec::<Vec<u8>>::from(b))
                .collect();
            (true, None, Some(moves), Some(path))
        }
        SearchOutcome::Unsolvable => (false, Some("unsolvable".to_string()), None, None),
        SearchOutcome::ResourceExhausted => {
            (false, Some("search_budget_exhausted".to_string()), None, None)
        }
    };

    SolveOutput {
        solved,
        reason,
        moves,
        path,
        nodes_expanded: result.nodes_expanded,
        nodes_generated: result.nodes_generated,
        peak_frontier: result.peak_frontier,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}
