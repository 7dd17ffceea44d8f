use std::io::{self, BufRead, Write};

use itertools::Itertools;
use log::info;
use multiverse_chess::error::TurnError;
use multiverse_chess::game::Game;
use multiverse_chess::rules::Rules;

use crate::tui;


const HELP: &str = "\
Commands:
  (0T1)e2>(0T1)e4   make a move; boards are written as (<timeline>T<turn>)
  ? (0T1)e2         list destinations of a piece
  undo              revert the last move of the current turn
  submit            end the turn once every moveable board has been played
  quit              leave the game";

enum Command {
    Move(String),
    Destinations(String),
    Undo,
    Submit,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "undo" => Command::Undo,
        "submit" => Command::Submit,
        "help" | "" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => match line.strip_prefix('?') {
            Some(square) => Command::Destinations(square.to_owned()),
            None => Command::Move(line.to_owned()),
        },
    }
}

fn execute(game: &mut Game, command: Command) -> Result<Option<String>, TurnError> {
    match command {
        Command::Move(notation) => {
            let mv = game.parse_move(&notation)?;
            if !game.moveable_positions(mv.from)?.contains(&mv.to) {
                return Ok(Some(format!("Illegal move: {}", game.move_to_notation(mv))));
            }
            game.make_move(mv)?;
            Ok(None)
        }
        Command::Destinations(notation) => {
            let from = game.parse_position(&notation)?;
            let destinations = game.moveable_positions(from)?;
            Ok(Some(if destinations.is_empty() {
                "No moves".to_owned()
            } else {
                destinations.into_iter().map(|to| game.position_to_notation(to)).join(" ")
            }))
        }
        Command::Undo => game.undo().map(|()| None),
        Command::Submit => game.submit_turn().map(|()| None),
        Command::Help => Ok(Some(HELP.to_owned())),
        Command::Quit => unreachable!(),
    }
}

pub fn run(rules: Rules) -> anyhow::Result<()> {
    info!("Starting {:?} game", rules.starting_position);
    let mut game = Game::new(rules);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}\n\n{}", HELP, tui::render_game(&game));
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let command = parse_command(&line);
        if matches!(command, Command::Quit) {
            return Ok(());
        }
        match execute(&mut game, command) {
            Ok(Some(message)) => println!("{message}"),
            Ok(None) => println!("{}", tui::render_game(&game)),
            Err(err) => println!("Error: {err:?}"),
        }
    }
}
