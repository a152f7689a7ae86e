//! Greedy automated player that heads straight for the opposing flag.
use log::{debug, warn};
use rand::Rng;

use crate::{
    board::{Board, BoardSnapshot, Coordinate, Direction},
    game::{GameMove, MoveSource, PlayerInput, RoundView},
    ships::{ShipId, Side},
};

/// Settings of the [`HeuristicPlayer`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HeuristicConfig {
    /// When set, the player steps in the best direction that is open instead of always
    /// trying the best direction and wasting the turn if it is blocked.
    pub fallback: bool,
}

/// Order in which to try the four directions to get from `from` to `target`.
///
/// The axis with the larger distance comes first, in the direction of the target, then
/// the other axis towards the target, then the other axis away from it, and finally the
/// first axis away from the target. Ties favour the vertical axis.
pub fn direction_priorities(from: Coordinate, target: Coordinate) -> [Direction; 4] {
    let (dx, dy) = from.delta(&target);
    let h = if dx > 0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let v = if dy > 0 { Direction::Down } else { Direction::Up };
    if dx.abs() > dy.abs() {
        [h, v, v.reverse(), h.reverse()]
    } else {
        [v, h, h.reverse(), v.reverse()]
    }
}

/// Automated player. Each turn it picks one of its ships at random and moves it one
/// step towards the opposing flag.
///
/// The player keeps its own record of its ships and the last move it made with each,
/// seeded from the board symbols. Before a ship is used its record is checked against the
/// board; a ship found at neither end of its last move is dropped from the record.
#[derive(Debug, Clone)]
pub struct HeuristicPlayer<R> {
    rng: R,
    config: HeuristicConfig,
    side: Side,
    /// Last move made by each ship believed alive.
    known: Vec<(ShipId, GameMove)>,
    /// Location of the opposing flag.
    target: Option<Coordinate>,
}

impl<R: Rng> HeuristicPlayer<R> {
    /// Create a player with the base behaviour.
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, Default::default())
    }

    pub fn with_config(rng: R, config: HeuristicConfig) -> Self {
        Self {
            rng,
            config,
            side: Side::PlayerA,
            known: Vec::new(),
            target: None,
        }
    }

    /// Rebuild the record of own ships from board symbols.
    fn reseed(&mut self, side: Side, board: &BoardSnapshot) {
        self.side = side;
        self.known.clear();
        self.target = None;
        for (coord, symbol) in board.iter() {
            if let Some(id) = ShipId::from_symbol(symbol) {
                if id.side() == side {
                    self.known.push((id, GameMove::stay(coord)));
                }
            } else if Side::from_flag_symbol(symbol) == Some(side.opponent()) {
                self.target = Some(coord);
            }
        }
        debug!(
            "[Heuristic] {} tracking {} ships",
            side,
            self.known.len()
        );
    }

    /// Pick a random ship whose record matches the board and return its index in
    /// `known` with its current position.
    fn select_ship(&mut self, board: &Board) -> Option<(usize, Coordinate)> {
        while !self.known.is_empty() {
            let i = self.rng.gen_range(0, self.known.len());
            let (id, last) = self.known[i];
            if board.occupant(last.to) == Some(id) {
                return Some((i, last.to));
            }
            if board.occupant(last.from) == Some(id) {
                return Some((i, last.from));
            }
            debug!("[Heuristic] {} no longer on the board", id);
            self.known.swap_remove(i);
        }
        None
    }

    /// Choose the step for the ship at `from`.
    fn choose_move(&self, board: &Board, from: Coordinate, target: Coordinate) -> GameMove {
        let priorities = direction_priorities(from, target);
        let mut direction = priorities[0];
        if self.config.fallback {
            let open = board.open_directions(from, self.side);
            if let Some(&first_open) = priorities.iter().find(|&&d| open.contains(d)) {
                direction = first_open;
            }
        }
        GameMove::new(from, direction.step(from).unwrap_or(from))
    }
}

impl<R: Rng> MoveSource for HeuristicPlayer<R> {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn init(&mut self, side: Side, board: &BoardSnapshot) {
        self.reseed(side, board);
    }

    fn next_move(&mut self, view: &RoundView<'_>) -> PlayerInput {
        if self.known.is_empty() || self.side != view.side() {
            self.reseed(view.side(), &view.snapshot());
        }
        let target = match self.target.or_else(|| view.opponent_flag()) {
            Some(target) => target,
            None => {
                warn!("[Heuristic] no opposing flag to head for");
                return PlayerInput::Abort;
            }
        };
        let board = view.board();
        let (i, from) = match self.select_ship(board) {
            Some(found) => found,
            None => {
                warn!("[Heuristic] {} has no ship to move", self.side);
                return PlayerInput::Abort;
            }
        };
        let mv = self.choose_move(board, from, target);
        self.known[i].1 = mv;
        PlayerInput::Move(mv)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        board::BoardSetup,
        game::{NullSink, Round, RoundConfig, ScriptedPlayer},
    };

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn round(rows: &[&str], first: Side) -> Round {
        let snapshot = BoardSnapshot::from_rows(rows).unwrap();
        let setup = BoardSetup::from_snapshot(&snapshot).unwrap();
        let config = RoundConfig {
            first,
            ..Default::default()
        };
        Round::new(setup, config).unwrap()
    }

    #[test]
    fn larger_axis_first() {
        use Direction::*;
        // Flag five columns right and one row up.
        assert_eq!(
            direction_priorities(at(2, 5), at(7, 4)),
            [Right, Up, Down, Left]
        );
        assert_eq!(direction_priorities(at(3, 1), at(3, 9)), [Down, Left, Right, Up]);
        assert_eq!(direction_priorities(at(9, 2), at(1, 5)), [Left, Down, Up, Right]);
        // Ties go vertical.
        assert_eq!(direction_priorities(at(4, 4), at(2, 2)), [Up, Left, Right, Down]);
    }

    #[test]
    fn base_behaviour_keeps_blocked_direction() {
        let round = round(&["A1SB", "    ", "   7"], Side::PlayerA);
        let mut ai = HeuristicPlayer::new(StdRng::seed_from_u64(3));
        ai.init(Side::PlayerA, &round.snapshot());
        assert_eq!(
            ai.next_move(&round.view()),
            PlayerInput::Move(GameMove::new(at(2, 1), at(3, 1)))
        );
    }

    #[test]
    fn fallback_takes_first_open_direction() {
        let round = round(&["A1SB", "    ", "   7"], Side::PlayerA);
        let config = HeuristicConfig { fallback: true };
        let mut ai = HeuristicPlayer::with_config(StdRng::seed_from_u64(3), config);
        // Without init the player seeds itself from the round.
        assert_eq!(
            ai.next_move(&round.view()),
            PlayerInput::Move(GameMove::new(at(2, 1), at(2, 2)))
        );
    }

    #[test]
    fn destroyed_ships_are_never_selected() {
        let mut round = round(&["A21", "  9", "B  "], Side::PlayerB);
        let initial = round.snapshot();
        // Ship 9 destroys ship 1.
        let mut b = ScriptedPlayer::new("b", vec![GameMove::new(at(3, 2), at(3, 1))]);
        round.play_turn(&mut b, &mut NullSink);
        assert_eq!(round.ships().living_count(Side::PlayerA), 1);
        let two = ShipId::from_number(2).unwrap();
        for seed in 0..16 {
            let mut ai = HeuristicPlayer::new(StdRng::seed_from_u64(seed));
            ai.init(Side::PlayerA, &initial);
            assert_eq!(ai.known.len(), 2);
            // The record of ship 1 is dropped once it is drawn, which may take a while.
            for _ in 0..64 {
                match ai.next_move(&round.view()) {
                    PlayerInput::Move(mv) => assert_eq!(mv.from, at(2, 1)),
                    other => panic!("unexpected input {:?}", other),
                }
                if ai.known.len() == 1 {
                    break;
                }
            }
            assert_eq!(ai.known.len(), 1, "seed {}", seed);
            assert_eq!(ai.known[0].0, two);
        }
    }

    #[test]
    fn follows_ship_after_its_move() {
        let mut round = round(&["A1 ", "   ", "  B", "7  "], Side::PlayerA);
        let mut ai = HeuristicPlayer::new(StdRng::seed_from_u64(0));
        ai.init(Side::PlayerA, &round.snapshot());
        let mut moves = Vec::new();
        for _ in 0..2 {
            match ai.next_move(&round.view()) {
                PlayerInput::Move(mv) => moves.push(mv),
                other => panic!("unexpected input {:?}", other),
            }
            let mv = *moves.last().unwrap();
            round.play_turn(&mut ScriptedPlayer::new("a", vec![mv]), &mut NullSink);
            round.play_turn(&mut ScriptedPlayer::new("b", vec![]), &mut NullSink);
        }
        assert_eq!(moves[0], GameMove::new(at(2, 1), at(2, 2)));
        assert_eq!(moves[1].from, at(2, 2));
    }
}
