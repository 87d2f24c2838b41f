// Text front end for a human playing against the AI.
use std::io::{BufRead, Write};

use anyhow::Result;

use connect_four_core::{GameOutcome, Player};
use connect_four_engine::Game;

enum Input {
    Column(usize),
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim() {
        "q" | "quit" => Some(Input::Quit),
        text => text.parse().ok().map(Input::Column),
    }
}

/// Plays `game` to the end with `human` entering columns on `input`; the
/// other side is the AI. Returns `InProgress` if the human quits or input
/// runs out.
pub fn run_session(
    game: &mut Game,
    human: Player,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<GameOutcome> {
    let mut lines = input.lines();
    let last_column = game.board().cols() - 1;
    writeln!(out, "{}\n", game.board())?;

    while !game.is_game_over() {
        let player = game.turn();

        if player != human {
            let Some(column) = game.best_move(player) else {
                break;
            };
            game.play_move(column)?;
            writeln!(out, "{player} -> column {column}")?;
            writeln!(out, "{}\n", game.board())?;
            continue;
        }

        write!(out, "{player}, your column (0-{last_column}, q to quit): ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(GameOutcome::InProgress);
        };

        match parse_input(&line?) {
            Some(Input::Quit) => return Ok(GameOutcome::InProgress),
            Some(Input::Column(column)) => match game.play_move(column) {
                Ok(_) => writeln!(out, "{}\n", game.board())?,
                Err(err) => writeln!(out, "{err}, try again")?,
            },
            None => writeln!(out, "not a column number, try again")?,
        }
    }

    Ok(game.outcome())
}
