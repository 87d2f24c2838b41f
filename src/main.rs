use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use connect_four_core::{GameOutcome, Player};
use connect_four_engine::{run_tournament, Difficulty, Game, GameConfig, TournamentConfig};

mod play;

/// Connect Four against the AI, AI matches and tournaments.
#[derive(Parser)]
#[command(name = "connect-four", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play Red from the terminal against the AI as Yellow
    Play {
        /// The AI's difficulty
        #[arg(long)]
        yellow: Option<Difficulty>,

        #[arg(long)]
        rows: Option<usize>,

        #[arg(long)]
        cols: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        /// JSON game configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Play one AI vs AI game, printing the board after every move
    Match {
        /// Red's difficulty: easy, medium, difficult or default
        #[arg(long)]
        red: Option<Difficulty>,

        /// Yellow's difficulty
        #[arg(long)]
        yellow: Option<Difficulty>,

        #[arg(long)]
        rows: Option<usize>,

        #[arg(long)]
        cols: Option<usize>,

        /// Seed for tie-breaking between equal moves
        #[arg(long)]
        seed: Option<u64>,

        /// JSON game configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Round-robin between difficulty tiers, printed as JSON
    Tournament {
        /// Games per ordered pairing of tiers
        #[arg(long)]
        games: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,

        /// JSON tournament configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON results
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play { yellow, rows, cols, seed, config } => {
            let mut game_config = load_game_config(config.as_ref())?;
            game_config.red = Difficulty::Default;
            if let Some(yellow) = yellow {
                game_config.yellow = yellow;
            }
            override_size(&mut game_config, rows, cols);
            run_play(&game_config, seed)
        }
        Command::Match { red, yellow, rows, cols, seed, config } => {
            let mut game_config = load_game_config(config.as_ref())?;
            if let Some(red) = red {
                game_config.red = red;
            }
            if let Some(yellow) = yellow {
                game_config.yellow = yellow;
            }
            override_size(&mut game_config, rows, cols);
            run_match(&game_config, seed)
        }
        Command::Tournament { games, seed, config, pretty } => {
            let mut tournament_config = load_tournament_config(config.as_ref())?;
            if let Some(games) = games {
                tournament_config.games_per_pairing = games;
            }
            if seed.is_some() {
                tournament_config.seed = seed;
            }

            let results = run_tournament(&tournament_config).context("running tournament")?;
            let json = if pretty {
                serde_json::to_string_pretty(&results)?
            } else {
                serde_json::to_string(&results)?
            };
            println!("{json}");
            Ok(())
        }
    }
}

// An explicit path must exist; without one the defaults apply
fn load_game_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn load_tournament_config(path: Option<&PathBuf>) -> Result<TournamentConfig> {
    match path {
        Some(path) => TournamentConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(TournamentConfig::default()),
    }
}

fn override_size(config: &mut GameConfig, rows: Option<usize>, cols: Option<usize>) {
    if let Some(rows) = rows {
        config.rows = rows;
    }
    if let Some(cols) = cols {
        config.cols = cols;
    }
}

fn new_game(config: &GameConfig, seed: Option<u64>) -> Result<Game> {
    let game = match seed {
        Some(seed) => Game::with_seed(config, seed),
        None => Game::new(config),
    };
    game.context("invalid game configuration")
}

fn run_play(config: &GameConfig, seed: Option<u64>) -> Result<()> {
    let mut game = new_game(config, seed)?;
    log::info!("You are Red; Yellow plays at {}", config.yellow);

    let outcome = play::run_session(&mut game, Player::Red, io::stdin().lock(), io::stdout())?;
    match outcome {
        GameOutcome::Winner(Player::Red) => println!("You win"),
        GameOutcome::Winner(Player::Yellow) => println!("Yellow wins"),
        GameOutcome::Draw => println!("Draw"),
        GameOutcome::InProgress => println!("Game abandoned"),
    }
    Ok(())
}

fn run_match(config: &GameConfig, seed: Option<u64>) -> Result<()> {
    let mut game = new_game(config, seed)?;

    log::info!(
        "{} (Red) vs {} (Yellow) on {}x{}",
        game.difficulty(Player::Red),
        game.difficulty(Player::Yellow),
        config.rows,
        config.cols
    );
    println!("{}\n", game.board());

    while !game.is_game_over() {
        let player = game.turn();
        let Some(column) = game.best_move(player) else {
            break;
        };
        let row = game
            .play_move(column)
            .with_context(|| format!("{player} played column {column}"))?;
        println!("{player} -> column {column} (row {row})");
        println!("{}\n", game.board());
    }

    match game.check_winner() {
        Some(winner) => println!("{winner} wins"),
        None => println!("Draw"),
    }
    log::info!("{} positions cached", game.cache_len());
    Ok(())
}
