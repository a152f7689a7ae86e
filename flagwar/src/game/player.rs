//! Sources of moves.
use std::collections::VecDeque;

use log::warn;

use crate::{
    board::BoardSnapshot,
    game::{GameMove, RoundView},
    ships::Side,
};

/// What a player hands back when asked for a move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlayerInput {
    Move(GameMove),
    /// Abandon the current round.
    Abort,
    /// Abandon the current round and stop playing.
    AbortAndQuit,
}

/// Anything that can play one side of a round: a person at a keyboard, a file of moves,
/// or an automated player.
pub trait MoveSource {
    /// Name shown in logs and summaries.
    fn name(&self) -> &str;

    /// Called once before the round starts with the side played and the initial board.
    fn init(&mut self, _side: Side, _board: &BoardSnapshot) {}

    /// Produce the move for the current turn. Blocks until one is available.
    fn next_move(&mut self, view: &RoundView<'_>) -> PlayerInput;
}

/// Plays a fixed list of moves in order. Once the list is exhausted it passes with its
/// first living ship.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    name: String,
    moves: VecDeque<GameMove>,
}

impl ScriptedPlayer {
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = GameMove>) -> Self {
        Self {
            name: name.into(),
            moves: moves.into_iter().collect(),
        }
    }

    /// Number of moves not played yet.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, view: &RoundView<'_>) -> PlayerInput {
        if let Some(mv) = self.moves.pop_front() {
            return PlayerInput::Move(mv);
        }
        let ships = view.ships();
        match ships.ships_of(view.side()).next() {
            Some(id) => PlayerInput::Move(GameMove::stay(ships[id].current_position())),
            None => {
                warn!("[Round] {} has no moves and no ships left", self.name);
                PlayerInput::Abort
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{BoardSetup, Coordinate},
        game::{NullSink, Round, RoundState},
    };

    #[test]
    fn plays_script_then_passes() {
        let snapshot = BoardSnapshot::from_rows(&["A 1", "   ", "B7 "]).unwrap();
        let setup = BoardSetup::from_snapshot(&snapshot).unwrap();
        let mut round = Round::new(setup, Default::default()).unwrap();
        let step = GameMove::new(Coordinate::new(3, 1), Coordinate::new(3, 2));
        let mut a = ScriptedPlayer::new("a", vec![step]);
        let mut b = ScriptedPlayer::new("b", vec![]);
        assert_eq!(a.remaining(), 1);

        assert_eq!(a.next_move(&round.view()), PlayerInput::Move(step));
        assert_eq!(a.remaining(), 0);
        round.play_turn(&mut ScriptedPlayer::new("a", vec![step]), &mut NullSink);
        assert_eq!(
            b.next_move(&round.view()),
            PlayerInput::Move(GameMove::stay(Coordinate::new(2, 3)))
        );
        round.play_turn(&mut b, &mut NullSink);
        assert_eq!(
            a.next_move(&round.view()),
            PlayerInput::Move(GameMove::stay(Coordinate::new(3, 2)))
        );
        assert_eq!(round.state(), RoundState::InProgress);
    }
}
