use std::collections::BTreeMap;

use connect_four_core::{GameOutcome, Player};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, TournamentConfig};
use crate::difficulty::Difficulty;
use crate::error::ConfigError;
use crate::game::Game;

/// How a single AI-vs-AI game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub outcome: GameOutcome,
    pub plies: usize,
}

/// Plays `game` to the end, each side moving with its own difficulty.
///
/// Stops early if the side to move has no column to play, which can only
/// happen on a full board.
pub fn play_full_game<R: Rng>(game: &mut Game<R>) -> MatchReport {
    let mut plies = 0;
    while !game.is_game_over() {
        let player = game.turn();
        let Some(column) = game.best_move(player) else {
            break;
        };
        if game.play_move(column).is_err() {
            log::warn!("{player} chose unplayable column {column}");
            break;
        }
        plies += 1;
    }
    MatchReport {
        outcome: game.outcome(),
        plies,
    }
}

/// Tally of one tier's games against one opponent tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Record {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub red: Difficulty,
    pub yellow: Difficulty,
    pub seed: u64,
    pub outcome: GameOutcome,
    pub plies: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResults {
    /// `records[a][b]` is tier `a`'s record against tier `b`, either color.
    pub records: BTreeMap<Difficulty, BTreeMap<Difficulty, Record>>,
    pub games: Vec<GameSummary>,
}

impl TournamentResults {
    pub fn record(&self, tier: Difficulty, opponent: Difficulty) -> Record {
        self.records
            .get(&tier)
            .and_then(|row| row.get(&opponent))
            .copied()
            .unwrap_or_default()
    }

    fn record_mut(&mut self, tier: Difficulty, opponent: Difficulty) -> &mut Record {
        self.records.entry(tier).or_default().entry(opponent).or_default()
    }

    fn add_game(&mut self, summary: GameSummary) {
        let (red, yellow) = (summary.red, summary.yellow);
        match summary.outcome {
            GameOutcome::Winner(Player::Red) => {
                self.record_mut(red, yellow).wins += 1;
                self.record_mut(yellow, red).losses += 1;
            }
            GameOutcome::Winner(Player::Yellow) => {
                self.record_mut(yellow, red).wins += 1;
                self.record_mut(red, yellow).losses += 1;
            }
            GameOutcome::Draw | GameOutcome::InProgress => {
                self.record_mut(red, yellow).draws += 1;
                self.record_mut(yellow, red).draws += 1;
            }
        }
        self.games.push(summary);
    }

    /// Total wins of `tier` over every opponent.
    pub fn total_wins(&self, tier: Difficulty) -> u32 {
        self.records
            .get(&tier)
            .map(|row| row.values().map(|r| r.wins).sum())
            .unwrap_or(0)
    }
}

/// Round-robin between the configured tiers: every ordered pair of distinct
/// tiers plays `games_per_pairing` fresh games with the first tier as Red.
///
/// Games run in parallel. Game `i` is seeded with `seed + i`, so a seeded
/// tournament always produces the same results.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentResults, ConfigError> {
    config.validate()?;
    let tiers = config.distinct_tiers();
    let base_seed = config.seed.unwrap_or_else(rand::random);

    let mut pairings = Vec::new();
    for &red in &tiers {
        for &yellow in &tiers {
            if red == yellow {
                continue;
            }
            for _ in 0..config.games_per_pairing {
                let seed = base_seed.wrapping_add(pairings.len() as u64);
                pairings.push((red, yellow, seed));
            }
        }
    }
    log::info!(
        "Tournament: {} tiers, {} games, base seed {base_seed}",
        tiers.len(),
        pairings.len()
    );

    let summaries: Vec<GameSummary> = pairings
        .par_iter()
        .map(|&(red, yellow, seed)| -> Result<GameSummary, ConfigError> {
            let game_config = GameConfig {
                rows: config.rows,
                cols: config.cols,
                red,
                yellow,
            };
            let mut game = Game::with_seed(&game_config, seed)?;
            let report = play_full_game(&mut game);
            log::info!(
                "{red} (Red) vs {yellow} (Yellow), seed {seed}: {:?} after {} plies",
                report.outcome,
                report.plies
            );
            Ok(GameSummary {
                red,
                yellow,
                seed,
                outcome: report.outcome,
                plies: report.plies,
            })
        })
        .collect::<Result<_, _>>()?;

    let mut results = TournamentResults::default();
    for summary in summaries {
        results.add_game(summary);
    }

    for &tier in &tiers {
        log::info!("{tier}: {} wins", results.total_wins(tier));
    }
    Ok(results)
}
