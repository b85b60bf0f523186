use std::fmt;
use super::{Cell, Move, Player};

/// The eight winning lines of a 3x3 grid: rows, columns, then both diagonals.
pub const LINES: [[Move; 3]; 8] = [
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(2, 0), Move::new(1, 1), Move::new(0, 2)],
];

/// Terminal state of a single 3x3 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won(Player),
    Tied,
    Undecided,
}

/// A 3x3 board. Plain value type: copies are cheap and independent, which is
/// how speculative marks are evaluated without touching the source board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Microboard {
    cells: [Cell; 9],
}

impl Microboard {
    pub fn new() -> Self { Self::default() }

    #[inline]
    fn idx(x: usize, y: usize) -> usize { y * 3 + x }

    pub fn get(&self, x: usize, y: usize) -> Cell { self.cells[Self::idx(x, y)] }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) { self.cells[Self::idx(x, y)] = cell; }

    pub fn is_legal(&self, x: usize, y: usize) -> bool { self.get(x, y).is_empty() }

    /// Puts a mark without checking that the cell is free.
    pub fn place(&mut self, x: usize, y: usize, player: Player) { self.set(x, y, Cell::Taken(player)); }

    pub fn clear(&mut self, x: usize, y: usize) { self.set(x, y, Cell::Empty); }

    pub fn has_mark(&self, x: usize, y: usize, player: Player) -> bool { self.get(x, y) == Cell::Taken(player) }

    /// Copy of this board with `player` marked on `mv`. The receiver is left as is.
    pub fn with_mark(&self, mv: Move, player: Player) -> Microboard {
        let mut child = *self;
        child.place(mv.x, mv.y, player);
        child
    }

    /// True iff some row, column or diagonal holds three marks of `player`.
    pub fn has_line(&self, player: Player) -> bool {
        let mark = Cell::Taken(player);
        LINES.iter().any(|line| line.iter().all(|c| self.get(c.x, c.y) == mark))
    }

    /// True iff some line holds at least `min_count` marks of `player` and
    /// nothing else but empty cells. Gaps are fine; one opposing (or closed)
    /// cell makes the line dead.
    pub fn has_partial_line(&self, player: Player, min_count: usize) -> bool {
        let mark = Cell::Taken(player);
        LINES.iter().any(|line| {
            let mut own = 0;
            for c in line {
                match self.get(c.x, c.y) {
                    Cell::Empty => {}
                    cell if cell == mark => own += 1,
                    _ => return false,
                }
            }
            own >= min_count
        })
    }

    /// Empty cells in row-major order (y outer, x inner).
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(9);
        for y in 0..3 {
            for x in 0..3 {
                if self.is_legal(x, y) { moves.push(Move::new(x, y)); }
            }
        }
        moves
    }

    pub fn has_legal_move(&self) -> bool { self.cells.iter().any(|c| c.is_empty()) }

    pub fn filled_count(&self) -> usize { self.cells.iter().filter(|c| !c.is_empty()).count() }

    pub fn is_full(&self) -> bool { !self.has_legal_move() }

    pub fn is_empty(&self) -> bool { self.cells.iter().all(|c| c.is_empty()) }

    pub fn outcome(&self) -> Outcome {
        for p in [Player::One, Player::Two] {
            if self.has_line(p) { return Outcome::Won(p); }
        }
        if self.is_full() { Outcome::Tied } else { Outcome::Undecided }
    }
}

impl fmt::Display for Microboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..3 {
            let row: Vec<String> = (0..3).map(|x| self.get(x, y).code().to_string()).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
