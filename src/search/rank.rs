use log::trace;
use rand::Rng;
use rand::seq::SliceRandom;
use crate::board::{Microboard, Move, Player};

const CORNERS: [Move; 4] = [Move::new(0, 0), Move::new(0, 2), Move::new(2, 0), Move::new(2, 2)];
const CENTER: Move = Move::new(1, 1);

/// Ordered candidate list that keeps the first occurrence of each move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankedMoves {
    moves: Vec<Move>,
}

impl RankedMoves {
    pub fn new() -> Self { Self { moves: Vec::with_capacity(9) } }

    /// Appends `mv` unless it is already listed. Returns whether it was added.
    pub fn push(&mut self, mv: Move) -> bool {
        if self.moves.contains(&mv) { return false; }
        self.moves.push(mv);
        true
    }

    pub fn contains(&self, mv: &Move) -> bool { self.moves.contains(mv) }
    pub fn len(&self) -> usize { self.moves.len() }
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn as_slice(&self) -> &[Move] { &self.moves }
    pub fn into_vec(self) -> Vec<Move> { self.moves }
}

/// One step of the rule chain. Passes append candidates in priority order;
/// moves proposed by an earlier pass keep their position.
pub trait RankPass: Send + Sync {
    fn name(&self) -> &'static str;
    fn propose(&self, board: &Microboard, player: Player, out: &mut RankedMoves);
}

/// Empty cells, bottom row first. The line-building passes scan in this order.
fn bottom_up(board: &Microboard) -> impl Iterator<Item = Move> + '_ {
    (0..3).rev().flat_map(|y| (0..3).map(move |x| Move::new(x, y))).filter(|m| board.is_legal(m.x, m.y))
}

fn completes_line(board: &Microboard, mv: Move, player: Player) -> bool {
    board.with_mark(mv, player).has_line(player)
}

/// Marking `mv` gives `player` an open two-line they did not have before.
fn opens_two(board: &Microboard, mv: Move, player: Player) -> bool {
    !board.has_partial_line(player, 2) && board.with_mark(mv, player).has_partial_line(player, 2)
}

pub struct WinPass;
pub struct BlockPass;
pub struct BuildPass;
pub struct CounterBuildPass;
pub struct CenterPass;
pub struct OppositeCornerPass;
pub struct CornerPass;

impl RankPass for WinPass {
    fn name(&self) -> &'static str { "win" }
    fn propose(&self, board: &Microboard, player: Player, out: &mut RankedMoves) {
        for mv in board.legal_moves() {
            if completes_line(board, mv, player) { out.push(mv); }
        }
    }
}

impl RankPass for BlockPass {
    fn name(&self) -> &'static str { "block" }
    fn propose(&self, board: &Microboard, player: Player, out: &mut RankedMoves) {
        let opp = player.opponent();
        for mv in board.legal_moves() {
            if completes_line(board, mv, opp) { out.push(mv); }
        }
    }
}

impl RankPass for BuildPass {
    fn name(&self) -> &'static str { "build" }
    fn propose(&self, board: &Microboard, player: Player, out: &mut RankedMoves) {
        for mv in bottom_up(board) {
            if opens_two(board, mv, player) { out.push(mv); }
        }
    }
}

impl RankPass for CounterBuildPass {
    fn name(&self) -> &'static str { "counter-build" }
    fn propose(&self, board: &Microboard, player: Player, out: &mut RankedMoves) {
        let opp = player.opponent();
        for mv in bottom_up(board) {
            if opens_two(board, mv, opp) { out.push(mv); }
        }
    }
}

impl RankPass for CenterPass {
    fn name(&self) -> &'static str { "center" }
    fn propose(&self, board: &Microboard, _player: Player, out: &mut RankedMoves) {
        if board.is_legal(CENTER.x, CENTER.y) { out.push(CENTER); }
    }
}

impl RankPass for OppositeCornerPass {
    fn name(&self) -> &'static str { "opposite-corner" }
    fn propose(&self, board: &Microboard, player: Player, out: &mut RankedMoves) {
        let opp = player.opponent();
        for c in CORNERS {
            let opposite = Move::new(2 - c.x, 2 - c.y);
            if board.has_mark(c.x, c.y, opp) && board.is_legal(opposite.x, opposite.y) { out.push(opposite); }
        }
    }
}

impl RankPass for CornerPass {
    fn name(&self) -> &'static str { "corner" }
    fn propose(&self, board: &Microboard, _player: Player, out: &mut RankedMoves) {
        for c in CORNERS {
            if board.is_legal(c.x, c.y) { out.push(c); }
        }
    }
}

/// The rule chain. Every empty cell not proposed by a pass is appended at
/// the end in random order, so the result always covers all legal moves.
pub struct Ranker {
    passes: Vec<Box<dyn RankPass>>,
}

impl Default for Ranker {
    fn default() -> Self { Self::standard() }
}

impl Ranker {
    /// win, block, build, counter-build, center, opposite corner, corner.
    pub fn standard() -> Self {
        Self {
            passes: vec![
                Box::new(WinPass),
                Box::new(BlockPass),
                Box::new(BuildPass),
                Box::new(CounterBuildPass),
                Box::new(CenterPass),
                Box::new(OppositeCornerPass),
                Box::new(CornerPass),
            ],
        }
    }

    pub fn pass_names(&self) -> Vec<&'static str> { self.passes.iter().map(|p| p.name()).collect() }

    /// Inserts `pass` right after the pass called `after`, e.g. a fork pass
    /// after "build". Returns false (and leaves the chain alone) if no pass
    /// has that name.
    pub fn insert_after(&mut self, after: &str, pass: Box<dyn RankPass>) -> bool {
        match self.passes.iter().position(|p| p.name() == after) {
            Some(i) => { self.passes.insert(i + 1, pass); true }
            None => false,
        }
    }

    pub fn rank<R: Rng + ?Sized>(&self, board: &Microboard, player: Player, rng: &mut R) -> Vec<Move> {
        let mut out = RankedMoves::new();
        for pass in &self.passes {
            let before = out.len();
            pass.propose(board, player, &mut out);
            if out.len() > before {
                trace!("{} pass added {:?}", pass.name(), &out.as_slice()[before..]);
            }
        }
        let mut rest = board.legal_moves();
        rest.shuffle(rng);
        for mv in rest { out.push(mv); }
        out.into_vec()
    }
}
