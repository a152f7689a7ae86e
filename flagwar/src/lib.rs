//! Engine for Flags, a two-player capture-the-flag game on a grid.
//!
//! Each side commands three numbered ships and defends a flag. Ships move one cell per
//! turn; moving onto a cell held by an enemy ship starts a combat decided by rank, and
//! moving onto the enemy flag wins the round.
//!
//! A round starts from a [`BoardSetup`][board::BoardSetup], built either at random or from
//! a [`BoardSnapshot`][board::BoardSnapshot] of symbols. A [`Round`][game::Round] then
//! asks two [`MoveSource`][game::MoveSource]s for moves in turn until it ends, and a
//! [`Session`][game::Session] keeps score across rounds.
//!
//! ```
//! use flagwar::{
//!     board::{BoardSetup, BoardSnapshot},
//!     game::{GameMove, NullSink, Round, RoundState, ScriptedPlayer},
//! };
//!
//! let snapshot = BoardSnapshot::from_rows(&["A1B", "   ", "  7"]).unwrap();
//! let setup = BoardSetup::from_snapshot(&snapshot).unwrap();
//! let mut round = Round::new(setup, Default::default()).unwrap();
//! let capture = GameMove::new((2, 1).into(), (3, 1).into());
//! let mut a = ScriptedPlayer::new("a", vec![capture]);
//! let mut b = ScriptedPlayer::new("b", vec![]);
//! let state = round.play(&mut a, &mut b, &mut NullSink);
//! assert_eq!(state.winner(), Some(flagwar::ships::Side::PlayerA));
//! assert!(matches!(state, RoundState::FlagCaptured(_)));
//! ```

pub mod board;
pub mod game;
pub mod ships;
