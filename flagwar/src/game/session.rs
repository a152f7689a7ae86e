//! Consecutive rounds between the same two players, with scoring.
use log::info;

use crate::{
    board::{BoardSetup, SetupError},
    game::{MoveSource, OutcomeSink, Round, RoundConfig, RoundState},
    ships::Side,
};

/// Points awarded to the winner of a round.
pub const WIN: u32 = 50;

/// Points taken from the loser of a round.
pub const LOSS: u32 = 30;

/// Running score of one player.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PlayerScore {
    pub name: String,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerScore {
    fn new(name: String) -> Self {
        Self {
            name,
            points: 0,
            wins: 0,
            losses: 0,
        }
    }
}

/// Plays rounds and keeps score until a player asks to quit.
#[derive(Debug, Clone)]
pub struct Session {
    scores: [PlayerScore; 2],
    rounds: u32,
    quit: bool,
}

impl Session {
    pub fn new(name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            scores: [
                PlayerScore::new(name_a.into()),
                PlayerScore::new(name_b.into()),
            ],
            rounds: 0,
            quit: false,
        }
    }

    /// Play a full round and score its result. Returns the final state of the round.
    pub fn play_round<'s>(
        &mut self,
        setup: BoardSetup,
        config: RoundConfig,
        a: &mut (dyn MoveSource + 's),
        b: &mut (dyn MoveSource + 's),
        sink: &mut dyn OutcomeSink,
    ) -> Result<RoundState, SetupError> {
        let mut round = Round::new(setup, config)?;
        let state = round.play(a, b, sink);
        self.award(state);
        Ok(state)
    }

    /// Record the result of a round.
    pub fn award(&mut self, state: RoundState) {
        self.rounds += 1;
        if state == RoundState::AbortAndQuit {
            self.quit = true;
        }
        if let Some(winner) = state.winner() {
            let won = &mut self.scores[winner.index()];
            won.points += WIN;
            won.wins += 1;
            let lost = &mut self.scores[winner.opponent().index()];
            lost.points = lost.points.saturating_sub(LOSS);
            lost.losses += 1;
        }
        info!(
            "[Session] round {} {}: {} {} points, {} {} points",
            self.rounds,
            state,
            self.scores[0].name,
            self.scores[0].points,
            self.scores[1].name,
            self.scores[1].points
        );
    }

    /// Score of the player on `side`.
    pub fn score(&self, side: Side) -> &PlayerScore {
        &self.scores[side.index()]
    }

    /// Number of rounds played.
    pub fn rounds_played(&self) -> u32 {
        self.rounds
    }

    /// Whether a player asked to stop playing.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Clear points and win/loss counts. Names and the round count are kept.
    pub fn reset_scores(&mut self) {
        for score in self.scores.iter_mut() {
            score.points = 0;
            score.wins = 0;
            score.losses = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{BoardSnapshot, Coordinate},
        game::{GameMove, NullSink, ScriptedPlayer},
    };

    #[test]
    fn winner_gains_and_loser_loses() {
        let mut session = Session::new("alice", "bob");
        session.award(RoundState::FlagCaptured(Side::PlayerA));
        session.award(RoundState::FlagCaptured(Side::PlayerA));
        session.award(RoundState::NoShipsLeft(Side::PlayerB));
        let a = session.score(Side::PlayerA);
        assert_eq!((a.points, a.wins, a.losses), (70, 2, 1));
        let b = session.score(Side::PlayerB);
        // 0 - 30 - 30 saturates at zero before the win.
        assert_eq!((b.points, b.wins, b.losses), (50, 1, 2));
        assert_eq!(session.rounds_played(), 3);
    }

    #[test]
    fn draws_and_aborts_score_nothing() {
        let mut session = Session::new("alice", "bob");
        session.award(RoundState::Draw);
        session.award(RoundState::Aborted);
        assert!(!session.should_quit());
        session.award(RoundState::AbortAndQuit);
        assert!(session.should_quit());
        for &side in Side::ALL.iter() {
            assert_eq!(session.score(side).points, 0);
        }
        assert_eq!(session.rounds_played(), 3);
    }

    #[test]
    fn reset_keeps_names() {
        let mut session = Session::new("alice", "bob");
        session.award(RoundState::FlagCaptured(Side::PlayerB));
        session.reset_scores();
        let b = session.score(Side::PlayerB);
        assert_eq!((b.name.as_str(), b.points, b.wins), ("bob", 0, 0));
    }

    #[test]
    fn plays_and_scores_a_round() {
        let snapshot = BoardSnapshot::from_rows(&["A  ", "   ", "7B1"]).unwrap();
        let setup = BoardSetup::from_snapshot(&snapshot).unwrap();
        let mut a = ScriptedPlayer::new(
            "a",
            vec![GameMove::new(Coordinate::new(3, 3), Coordinate::new(2, 3))],
        );
        let mut b = ScriptedPlayer::new("b", vec![]);
        let mut session = Session::new("a", "b");
        let state = session
            .play_round(setup, Default::default(), &mut a, &mut b, &mut NullSink)
            .unwrap();
        assert_eq!(state, RoundState::FlagCaptured(Side::PlayerA));
        assert_eq!(session.score(Side::PlayerA).points, WIN);
    }
}
