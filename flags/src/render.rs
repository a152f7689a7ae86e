//! Plain text output of boards and turn reports.
use std::{fmt, thread, time::Duration};

use flagwar::{
    board::{Board, Coordinate, Terrain},
    game::{MoveOutcome, OutcomeSink, RoundView, TurnReport},
    ships::CombatResult,
};

/// Prints every turn and the board after it, pausing between turns.
pub struct TextRenderer {
    delay: Duration,
}

impl TextRenderer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl OutcomeSink for TextRenderer {
    fn report(&mut self, view: &RoundView<'_>, report: &TurnReport) {
        match *report {
            TurnReport::Resolved(outcome) => {
                println!("Turn {}, {}: {}", view.turn(), view.side(), Outcome(outcome))
            }
            TurnReport::Blocked { attempted, error } => println!(
                "Turn {}, {}: {} -> {} rejected, {}",
                view.turn(),
                view.side(),
                Cell(attempted.from),
                Cell(attempted.to),
                error
            ),
            TurnReport::RoundEnded(state) => {
                println!("Round over: {}", state);
                return;
            }
        }
        show_board(view.board());
        if self.delay > Duration::from_millis(0) {
            thread::sleep(self.delay);
        }
    }
}

/// Show the board by printing the grid with column letters and row numbers.
pub fn show_board(board: &Board) {
    print!("   ");
    for x in 1..=board.width() {
        print!("{:^3}", column_label(x));
    }
    println!();
    for y in 1..=board.height() {
        print!("{:>2} ", y);
        for x in 1..=board.width() {
            let coord = Coordinate::new(x, y);
            let symbol = match board.symbol_at(coord) {
                Some(symbol) if symbol == Terrain::Regular.symbol() => '.',
                Some(symbol) => symbol,
                None => '?',
            };
            print!("{:^3}", symbol);
        }
        println!();
    }
}

/// Letters naming the column `x`: `A` to `Z`, then `AA`, `AB` and so on.
fn column_label(x: usize) -> String {
    let mut label = Vec::new();
    let mut n = x;
    while n > 0 {
        n -= 1;
        label.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    label.iter().rev().collect()
}

/// Display helper that prints a coordinate the way the board labels it, e.g. `C4`.
struct Cell(Coordinate);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", column_label(self.0.x), self.0.y)
    }
}

/// Display helper describing a move outcome.
struct Outcome(MoveOutcome);

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            MoveOutcome::Passed { ship, at } => write!(f, "{} holds at {}", ship, Cell(at)),
            MoveOutcome::Moved { ship, from, to } => {
                write!(f, "{} moves {} -> {}", ship, Cell(from), Cell(to))
            }
            MoveOutcome::Combat {
                attacker,
                defender,
                at,
                result,
            } => {
                write!(f, "{} attacks {} at {}, ", attacker, defender, Cell(at))?;
                match result {
                    CombatResult::MoverWins => write!(f, "{} destroyed", defender),
                    CombatResult::DefenderWins => f.write_str("attack repelled"),
                    CombatResult::MutualDestruction => f.write_str("both destroyed"),
                }
            }
            MoveOutcome::FlagCaptured { ship, at, defeated } => {
                write!(f, "{} captures the flag at {}", ship, Cell(at))?;
                match defeated {
                    Some(guard) => write!(f, " after destroying {}", guard),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_lettered() {
        assert_eq!(column_label(1), "A");
        assert_eq!(column_label(13), "M");
        assert_eq!(column_label(26), "Z");
        assert_eq!(column_label(27), "AA");
        assert_eq!(Cell(Coordinate::new(3, 4)).to_string(), "C4");
    }
}
