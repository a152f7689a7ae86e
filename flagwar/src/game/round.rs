//! Turn controller for a single round.
use std::fmt;

use log::{debug, info, warn};

use crate::{
    board::{Board, BoardSetup, BoardSnapshot, Coordinate, SetupError},
    game::{
        resolve::{self, MoveOutcome},
        GameMove, InvariantViolation, MoveError, MoveSource, PlayerInput,
    },
    ships::{ShipRegistry, Side},
};

/// State of a round. Every state other than `InProgress` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RoundState {
    InProgress,
    /// A player abandoned the round.
    Aborted,
    /// A player abandoned the round and asked to stop playing altogether.
    AbortAndQuit,
    /// The given side reached the opposing flag.
    FlagCaptured(Side),
    /// The opponent of the given side has no living ships left.
    NoShipsLeft(Side),
    /// Neither side won: both fleets were destroyed or the turn limit was reached.
    Draw,
}

impl RoundState {
    /// Whether the round is over.
    pub fn is_terminal(self) -> bool {
        self != RoundState::InProgress
    }

    /// The side that won the round, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            RoundState::FlagCaptured(side) | RoundState::NoShipsLeft(side) => Some(side),
            _ => None,
        }
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RoundState::InProgress => f.write_str("in progress"),
            RoundState::Aborted => f.write_str("aborted"),
            RoundState::AbortAndQuit => f.write_str("aborted, quitting"),
            RoundState::FlagCaptured(side) => write!(f, "{} captured the flag", side),
            RoundState::NoShipsLeft(side) => {
                write!(f, "{} wins, {} has no ships left", side, side.opponent())
            }
            RoundState::Draw => f.write_str("draw"),
        }
    }
}

/// Settings of a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RoundConfig {
    /// Side that plays the first turn.
    pub first: Side,

    /// Number of turns, counting both sides, after which the round is a draw. `None`
    /// plays until a side wins or aborts.
    pub max_turns: Option<usize>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            first: Side::PlayerA,
            max_turns: Some(1000),
        }
    }
}

/// What happened during one turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TurnReport {
    /// The move was played.
    Resolved(MoveOutcome),

    /// The move was rejected and the turn wasted. Nothing changed on the board.
    Blocked {
        attempted: GameMove,
        error: MoveError,
    },

    /// The round reached a terminal state.
    RoundEnded(RoundState),
}

/// Receiver of the per-turn reports of a round, such as a renderer or a recorder.
pub trait OutcomeSink {
    /// Receive a report. `view` shows the round after the turn, from the side that
    /// played it.
    fn report(&mut self, view: &RoundView<'_>, report: &TurnReport);
}

/// Sink that discards every report.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullSink;

impl OutcomeSink for NullSink {
    fn report(&mut self, _view: &RoundView<'_>, _report: &TurnReport) {}
}

impl OutcomeSink for Vec<TurnReport> {
    fn report(&mut self, _view: &RoundView<'_>, report: &TurnReport) {
        self.push(*report);
    }
}

/// Read-only view of a round, as seen by one side.
#[derive(Debug, Copy, Clone)]
pub struct RoundView<'a> {
    board: &'a Board,
    ships: &'a ShipRegistry,
    side: Side,
    turn: usize,
    opponent_last: Option<GameMove>,
}

impl<'a> RoundView<'a> {
    /// The board.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Ships of both sides.
    pub fn ships(&self) -> &'a ShipRegistry {
        self.ships
    }

    /// The side this view belongs to.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of turns played so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The last move the opponent attempted, if it has played yet.
    pub fn opponent_last_move(&self) -> Option<GameMove> {
        self.opponent_last
    }

    /// Location of this side's flag.
    pub fn own_flag(&self) -> Option<Coordinate> {
        self.board.flag(self.side)
    }

    /// Location of the opponent's flag.
    pub fn opponent_flag(&self) -> Option<Coordinate> {
        self.board.flag(self.side.opponent())
    }

    /// Render the board into symbols.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::of_board(self.board)
    }
}

/// A round in play. Owns the board and the ships; both are dropped with the round.
#[derive(Debug, Clone)]
pub struct Round {
    board: Board,
    ships: ShipRegistry,
    config: RoundConfig,

    /// Side whose turn it is.
    current: Side,

    /// Number of turns played.
    turn: usize,

    state: RoundState,

    /// Last move attempted by each side, indexed by [`Side::index`].
    last_moves: [Option<GameMove>; 2],
}

impl Round {
    /// Start a round from a completed setup.
    pub fn new(setup: BoardSetup, config: RoundConfig) -> Result<Self, SetupError> {
        setup.validate()?;
        let (board, ships) = setup.into_parts();
        Ok(Self {
            board,
            ships,
            config,
            current: config.first,
            turn: 0,
            state: RoundState::InProgress,
            last_moves: [None; 2],
        })
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Ships of both sides.
    pub fn ships(&self) -> &ShipRegistry {
        &self.ships
    }

    /// Settings this round was started with.
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Number of turns played.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Side whose turn it is.
    pub fn current_side(&self) -> Side {
        self.current
    }

    /// Last move attempted by `side`.
    pub fn last_move(&self, side: Side) -> Option<GameMove> {
        self.last_moves[side.index()]
    }

    /// The round as seen by the side whose turn it is.
    pub fn view(&self) -> RoundView<'_> {
        self.view_for(self.current)
    }

    fn view_for(&self, side: Side) -> RoundView<'_> {
        RoundView {
            board: &self.board,
            ships: &self.ships,
            side,
            turn: self.turn,
            opponent_last: self.last_moves[side.opponent().index()],
        }
    }

    /// Render the board into symbols.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::of_board(&self.board)
    }

    /// Check that the board and the registry agree on where every living ship is.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        resolve::check_invariants(&self.board, &self.ships)
    }

    /// Play one turn for the current side, asking `source` for its move. Does nothing
    /// once the round is over.
    pub fn play_turn(
        &mut self,
        source: &mut dyn MoveSource,
        sink: &mut dyn OutcomeSink,
    ) -> RoundState {
        if self.state.is_terminal() {
            return self.state;
        }
        let side = self.current;
        let mv = match source.next_move(&self.view()) {
            PlayerInput::Move(mv) => mv,
            PlayerInput::Abort => return self.finish(side, RoundState::Aborted, sink),
            PlayerInput::AbortAndQuit => {
                return self.finish(side, RoundState::AbortAndQuit, sink)
            }
        };

        let report = match self.apply(side, mv) {
            Ok(outcome) => TurnReport::Resolved(outcome),
            Err(error) => {
                warn!("[Round] {} move {} rejected: {}", side, mv, error);
                TurnReport::Blocked {
                    attempted: mv,
                    error,
                }
            }
        };
        self.last_moves[side.index()] = Some(mv);
        self.turn += 1;
        sink.report(&self.view_for(side), &report);

        let state = self.settle(&report);
        self.current = side.opponent();
        if state.is_terminal() {
            self.finish(side, state, sink)
        } else {
            state
        }
    }

    /// Play until the round ends. Both sources are initialised with the starting board
    /// first.
    pub fn play<'s>(
        &mut self,
        a: &mut (dyn MoveSource + 's),
        b: &mut (dyn MoveSource + 's),
        sink: &mut dyn OutcomeSink,
    ) -> RoundState {
        let snapshot = self.snapshot();
        a.init(Side::PlayerA, &snapshot);
        b.init(Side::PlayerB, &snapshot);
        info!(
            "[Round] {} vs {}, {} moves first",
            a.name(),
            b.name(),
            self.current
        );
        while !self.state.is_terminal() {
            let source = match self.current {
                Side::PlayerA => &mut *a,
                Side::PlayerB => &mut *b,
            };
            self.play_turn(source, sink);
        }
        self.state
    }

    /// Resolve a move, asserting in debug builds that the board stayed consistent.
    fn apply(&mut self, side: Side, mv: GameMove) -> Result<MoveOutcome, MoveError> {
        let outcome = resolve::resolve_move(&mut self.board, &mut self.ships, side, mv)?;
        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                panic!("board and ships out of sync after {}: {}", mv, violation);
            }
        }
        Ok(outcome)
    }

    /// Work out the state following a played turn.
    fn settle(&self, report: &TurnReport) -> RoundState {
        if let TurnReport::Resolved(MoveOutcome::FlagCaptured { ship, .. }) = *report {
            return RoundState::FlagCaptured(ship.side());
        }
        let a_left = self.ships.living_count(Side::PlayerA) > 0;
        let b_left = self.ships.living_count(Side::PlayerB) > 0;
        match (a_left, b_left) {
            (false, false) => RoundState::Draw,
            (true, false) => RoundState::NoShipsLeft(Side::PlayerA),
            (false, true) => RoundState::NoShipsLeft(Side::PlayerB),
            (true, true) => match self.config.max_turns {
                Some(max) if self.turn >= max => {
                    debug!("[Round] turn limit of {} reached", max);
                    RoundState::Draw
                }
                _ => RoundState::InProgress,
            },
        }
    }

    fn finish(&mut self, side: Side, state: RoundState, sink: &mut dyn OutcomeSink) -> RoundState {
        self.state = state;
        info!("[Round] round over after {} turns: {}", self.turn, state);
        sink.report(&self.view_for(side), &TurnReport::RoundEnded(state));
        state
    }
}
