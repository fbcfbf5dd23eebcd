use clap::{Parser, ValueEnum};
use log::info;
use npuzzle_solver::utils::board_from_file;
use npuzzle_solver::{Heuristic, Solver};
use std::path::PathBuf;
use std::process;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Hamming,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Hamming => Heuristic::Hamming,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Priority function used to order the search
    #[clap(long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicArg,

    /// Print only the minimum number of moves
    #[clap(short, long)]
    quiet: bool,

    /// Print the blank moves instead of the intermediate boards
    #[clap(short, long)]
    moves: bool,

    /// Path to the board file (dimension followed by n*n tiles)
    board_file: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match board_from_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid board {}: {}", args.board_file.display(), e);
            process::exit(1);
        }
    };
    info!("loaded {}x{} board from {}", board.dimension(), board.dimension(), args.board_file.display());

    let solver = Solver::with_heuristic(board, args.heuristic.into());
    let stats = solver.stats();
    info!(
        "expanded {} nodes ({} on the twin), enqueued {}",
        stats.total_expanded(),
        stats.twin_expanded,
        stats.enqueued + stats.twin_enqueued
    );

    if !solver.is_solvable() {
        println!("No solution possible");
        return;
    }

    println!("Minimum number of moves = {}", solver.moves());
    if args.quiet {
        return;
    }

    if args.moves {
        if let Some(moves) = solver.solution_moves() {
            for (i, m) in moves.iter().enumerate() {
                println!("  Move {}: {}", i + 1, m);
            }
        }
    } else if let Some(path) = solver.solution() {
        for board in path {
            println!("{}", board);
        }
    }
}
