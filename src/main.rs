//! Arena battle driver.
//!
//! Plays one scripted battle to completion, printing the engine's text
//! surfaces along the way.
//!
//! Usage:
//!   cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                      # one battle from an entropy seed
//!   cargo run -- --seed 42         # reproducible battle
//!   cargo run -- --rematch         # play a rematch afterwards
//!   cargo run -- --json            # dump the turn records to a file

use arena::{BattleEngine, BattleError, RandomSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::env;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_seed(&args);
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut engine = match BattleEngine::new(rng) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("failed to set up the arena: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&mut engine, &args) {
        eprintln!("battle aborted: {}", err);
        std::process::exit(1);
    }
}

fn run<R: RandomSource>(engine: &mut BattleEngine<R>, args: &[String]) -> arena::Result<()> {
    println!("{}\n", engine.introduce_battle());

    engine.call_players(101, 777)?;
    println!("{}\n", engine.players_basic_info()?);

    engine.prepare()?;
    println!("{}\n", engine.players_description()?);

    run_battle(engine)?;

    if args.iter().any(|a| a == "--rematch") {
        println!("\nThe players rest up and head back in for a rematch!\n");
        engine.rematch()?;
        println!("{}\n", engine.players_description()?);
        run_battle(engine)?;
    }

    if args.iter().any(|a| a == "--json") {
        let json = serde_json::to_string_pretty(engine.records())
            .expect("turn records serialize cleanly");
        let filename = format!(
            "battle_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json).expect("failed to write JSON report");
        println!("\nTurn records saved to: {}", filename);
    }

    Ok(())
}

/// Start the prepared battle and play turns until it ends.
fn run_battle<R: RandomSource>(engine: &mut BattleEngine<R>) -> arena::Result<()> {
    engine.start()?;
    loop {
        match engine.play_turn() {
            Ok(()) => {
                println!("{}\n", engine.turn_details()?);
                if engine.is_over() {
                    break;
                }
            }
            // The stall signal: no more progress is possible, show the draw.
            Err(BattleError::Redundancy) => break,
            Err(err) => return Err(err),
        }
    }
    println!("{}", engine.final_result());
    Ok(())
}

fn parse_seed(args: &[String]) -> Option<u64> {
    let position = args.iter().position(|a| a == "--seed")?;
    args.get(position + 1)?.parse().ok()
}
