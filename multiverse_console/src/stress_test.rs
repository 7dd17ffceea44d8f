use std::time::Instant;

use enum_map::EnumMap;
use log::info;
use multiverse_chess::force::Force;
use multiverse_chess::game::Game;
use multiverse_chess::rules::{Rules, StartingPosition};
use multiverse_chess::test_util::{random_move, timeline_fingerprint, verify_invariants};
use rand::Rng;


const ACTIONS_PER_GAME: usize = 2_000;
const UNDO_RATIO: f64 = 0.15;

pub struct StressTestConfig {
    pub variants: Vec<StartingPosition>,
    pub num_games: usize,
}

#[derive(Default)]
struct Stats {
    games: usize,
    moves: usize,
    undos: usize,
    turns: usize,
    victories: EnumMap<Force, usize>,
    max_timelines: usize,
}

// Plays a random game. Each pending move keeps the fingerprint of the state before it, so every
// undo is checked against the exact state it must restore.
fn run_game(rules: Rules, rng: &mut impl Rng, stats: &mut Stats) {
    let mut game = Game::new(rules);
    let mut fingerprints = Vec::new();
    for _ in 0..ACTIONS_PER_GAME {
        if game.undoable() && rng.random_bool(UNDO_RATIO) {
            game.undo().unwrap();
            let (fingerprint, num_boards) = fingerprints.pop().unwrap();
            assert_eq!(timeline_fingerprint(&game), fingerprint);
            assert_eq!(game.num_boards(), num_boards);
            stats.undos += 1;
        } else if game.undoable() && game.turn_complete() {
            game.submit_turn().unwrap();
            fingerprints.clear();
            stats.turns += 1;
            if let Some(winner) = game.winner() {
                stats.victories[winner] += 1;
                break;
            }
        } else if let Some(mv) = random_move(&game, rng) {
            fingerprints.push((timeline_fingerprint(&game), game.num_boards()));
            game.make_move(mv).unwrap();
            stats.moves += 1;
        } else {
            info!("No moves available on turn {}", game.present_full_turn() + 1);
            break;
        }
        verify_invariants(&game);
    }
    stats.games += 1;
    stats.max_timelines = stats.max_timelines.max(game.timelines().len());
}

pub fn run(config: StressTestConfig) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    for variant in config.variants {
        let mut stats = Stats::default();
        let start = Instant::now();
        for _ in 0..config.num_games {
            run_game(Rules::for_variant(variant), &mut rng, &mut stats);
        }
        let elapsed = start.elapsed();
        info!(
            "{:?}: {} games, {} turns, {} moves, {} undos, {}/{} white/black victories, up to {} timelines; \
             {:.1} moves/s",
            variant,
            stats.games,
            stats.turns,
            stats.moves,
            stats.undos,
            stats.victories[Force::White],
            stats.victories[Force::Black],
            stats.max_timelines,
            stats.moves as f64 / elapsed.as_secs_f64()
        );
    }
    Ok(())
}
