use clap::Parser;
use log::debug;
use npuzzle_solver::{Board, Heuristic, Solver};
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares search effort of the heuristics on random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Board dimension
    #[clap(short = 'n', long, default_value_t = 3)]
    size: usize,

    /// Random blank moves applied to the goal board to scramble it
    #[clap(long, default_value_t = 30)]
    scramble: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Default)]
struct Totals {
    expanded: usize,
    moves: usize,
    millis: u128,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.size < 2 {
        eprintln!("Board dimension must be at least 2, got {}", args.size);
        std::process::exit(1);
    }

    let heuristics = [Heuristic::Manhattan, Heuristic::Hamming];
    let mut totals: Vec<Totals> = heuristics.iter().map(|_| Totals::default()).collect();

    println!(
        "Evaluating {} boards ({}x{}, {} scramble moves, seeds {}..{})",
        args.boards,
        args.size,
        args.size,
        args.scramble,
        args.seed,
        args.seed + args.boards as u64
    );

    for board_idx in 0..args.boards {
        let seed = args.seed + board_idx as u64;
        let board = Board::new_scrambled_with_seed(args.size, args.scramble, seed);
        debug!("board {} (seed {}):\n{}", board_idx, seed, board);

        println!("\nBoard {} (Seed: {})", board_idx, seed);
        for (heuristic, total) in heuristics.iter().zip(totals.iter_mut()) {
            let started = Instant::now();
            let solver = Solver::with_heuristic(board.clone(), *heuristic);
            let elapsed = started.elapsed().as_millis();
            let stats = solver.stats();

            println!(
                "  Heuristic: {:<10} Moves: {:<4} Expanded: {:<10} Time: {} ms",
                heuristic.to_string(),
                solver.moves(),
                stats.total_expanded(),
                elapsed
            );
            total.expanded += stats.total_expanded();
            total.moves += solver.moves().max(0) as usize;
            total.millis += elapsed;
        }
    }

    println!("\n--- Evaluation Complete ---");
    for (heuristic, total) in heuristics.iter().zip(totals.iter()) {
        let boards = args.boards.max(1) as f64;
        println!(
            "Heuristic {:<10}: Avg moves = {:.2}, Avg expanded = {:.1}, Total time = {} ms",
            heuristic.to_string(),
            total.moves as f64 / boards,
            total.expanded as f64 / boards,
            total.millis
        );
    }
}
