//! Moves typed at the terminal.
use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
};

use log::error;
use once_cell::sync::Lazy;
use regex::Regex;

use flagwar::{
    board::Direction,
    game::{GameMove, MoveSource, PlayerInput, RoundView},
    ships::ShipId,
};

use crate::render::show_board;

/// Helper to read input from the player.
pub struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    pub fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    pub fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. End of input
    /// is an error.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(())
    }
}

/// A command typed by the player.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    /// Step a ship, or keep it in place when no direction is given.
    Move(ShipId, Option<Direction>),
    Pass,
    Abort,
    Quit,
    Help,
}

/// Parse one lower-cased line. Prints why the line is invalid and returns `None` if it
/// is not a command.
fn parse_command(line: &str) -> Option<Command> {
    /// Matcher for ship moves.
    static MOVE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:move\s+)?
        (?P<ship>[0-9])\s+
        (?:(?:to|->)\s+)?
        (?P<dir>\w+)$",
        )
        .unwrap()
    });

    match line {
        "?" | "help" | "h" => Some(Command::Help),
        "pass" | "skip" => Some(Command::Pass),
        "abort" | "giveup" | "give up" => Some(Command::Abort),
        "quit" | "exit" | "q" => Some(Command::Quit),
        other => {
            let captures = match MOVE.captures(other) {
                Some(captures) => captures,
                None => {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    return None;
                }
            };
            let number = captures["ship"].parse().ok();
            let id = match number.and_then(ShipId::from_number) {
                Some(id) => id,
                None => {
                    println!("invalid ship: {}", &captures["ship"]);
                    return None;
                }
            };
            let dir = match &captures["dir"] {
                "up" | "north" | "u" | "n" => Some(Direction::Up),
                "down" | "south" | "d" | "s" => Some(Direction::Down),
                "left" | "west" | "l" | "w" => Some(Direction::Left),
                "right" | "east" | "r" | "e" => Some(Direction::Right),
                "stay" | "hold" | "x" => None,
                other => {
                    println!(
                        "invalid direction {}, choose \"up\", \"down\", \"left\", \"right\", or \"stay\"",
                        other
                    );
                    return None;
                }
            };
            Some(Command::Move(id, dir))
        }
    }
}

fn print_help() {
    println!(
        "Available Commands:
    <ship> <dir>    move the ship one cell. Directions are \"up\", \"down\", \"left\",
                    and \"right\", or \"stay\" to keep the ship in place.
    pass            keep your first ship in place.
    abort           give up this round.
    quit            give up this round and stop playing."
    );
}

/// A person playing one side from the terminal. Both sides may share the same input.
pub struct KeyboardPlayer<'a, B> {
    name: String,
    input: &'a RefCell<InputReader<B>>,

    /// Show the board before every prompt. When unset the board is only shown before
    /// the first turn of a round, and a renderer is expected to print it after each
    /// turn.
    show_board: bool,
}

impl<'a, B: BufRead> KeyboardPlayer<'a, B> {
    pub fn new(
        name: impl Into<String>,
        input: &'a RefCell<InputReader<B>>,
        show_board: bool,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            show_board,
        }
    }

    fn wants_board(&self, view: &RoundView<'_>) -> bool {
        self.show_board || view.turn() == 0
    }

    fn read_move(&mut self, view: &RoundView<'_>) -> io::Result<PlayerInput> {
        let side = view.side();
        let ships = view.ships();
        if self.wants_board(view) {
            println!();
            show_board(view.board());
        }
        if let Some(last) = view.opponent_last_move() {
            println!("{} played {}", side.opponent(), last);
        }
        println!("{}, your move. Type help or ? for commands.", self.name);

        let mut input = self.input.borrow_mut();
        loop {
            match input.read_input_lower(">", parse_command)? {
                Command::Help => print_help(),
                Command::Abort => return Ok(PlayerInput::Abort),
                Command::Quit => return Ok(PlayerInput::AbortAndQuit),
                Command::Pass => {
                    return Ok(match ships.ships_of(side).next() {
                        Some(id) => PlayerInput::Move(GameMove::stay(ships[id].current_position())),
                        None => PlayerInput::Abort,
                    });
                }
                Command::Move(id, dir) => {
                    let from = match ships.get(id) {
                        Some(ship) if ship.owner() == side && ship.alive() => {
                            ship.current_position()
                        }
                        _ => {
                            println!("You have no {} on the board.", id);
                            continue;
                        }
                    };
                    let to = match dir {
                        None => from,
                        Some(dir) => match view.board().neighbor(from, dir) {
                            Some(to) => to,
                            None => {
                                println!("{} cannot leave the board.", id);
                                continue;
                            }
                        },
                    };
                    return Ok(PlayerInput::Move(GameMove::new(from, to)));
                }
            }
        }
    }
}

impl<'a, B: BufRead> MoveSource for KeyboardPlayer<'a, B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, view: &RoundView<'_>) -> PlayerInput {
        match self.read_move(view) {
            Ok(input) => input,
            Err(err) => {
                error!("[Keyboard] {}: {}", self.name, err);
                PlayerInput::AbortAndQuit
            }
        }
    }
}
