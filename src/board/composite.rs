use std::fmt;
use log::debug;
use super::{Cell, MacroBoard, MacroStatus, Microboard, Move};
use crate::error::{Error, Result};

const SIZE: usize = 9;

/// The full 9x9 grid together with the macroboard feed. This is the single
/// authoritative board for a turn; everything else works on copies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositeBoard {
    cells: [[Cell; SIZE]; SIZE],
    macroboard: MacroBoard,
}

/// Splits a comma or semicolon separated list of integers, checking its length.
fn parse_codes(field: &'static str, s: &str, expected: usize) -> Result<Vec<i64>> {
    let normalized = s.trim().replace(';', ",");
    let mut codes = Vec::with_capacity(expected);
    for tok in normalized.split(',') {
        let tok = tok.trim();
        let v = tok.parse::<i64>().map_err(|_| Error::malformed(field, format!("'{tok}' is not an integer")))?;
        codes.push(v);
    }
    if codes.len() != expected {
        return Err(Error::malformed(field, format!("expected {expected} values, got {}", codes.len())));
    }
    Ok(codes)
}

fn decode_cells(codes: &[i64]) -> Result<[[Cell; SIZE]; SIZE]> {
    if codes.len() != SIZE * SIZE {
        return Err(Error::malformed("field", format!("expected {} values, got {}", SIZE * SIZE, codes.len())));
    }
    let mut cells = [[Cell::Empty; SIZE]; SIZE];
    for (i, &code) in codes.iter().enumerate() {
        cells[i / SIZE][i % SIZE] = Cell::from_code(code)
            .ok_or_else(|| Error::malformed("field", format!("unknown cell code {code} at index {i}")))?;
    }
    Ok(cells)
}

fn decode_statuses(codes: &[i64]) -> Result<MacroBoard> {
    if codes.len() != 9 {
        return Err(Error::malformed("macroboard", format!("expected 9 values, got {}", codes.len())));
    }
    let mut slots = [MacroStatus::Open; 9];
    for (i, &code) in codes.iter().enumerate() {
        slots[i] = MacroStatus::from_code(code)
            .ok_or_else(|| Error::malformed("macroboard", format!("unknown status code {code} at index {i}")))?;
    }
    Ok(MacroBoard::from_slots(slots))
}

impl CompositeBoard {
    pub fn new() -> Self { Self::default() }

    /// Replaces all 81 cells from a row-major list. On error nothing changes.
    pub fn load_cells(&mut self, s: &str) -> Result<()> {
        let codes = parse_codes("field", s, SIZE * SIZE)?;
        self.cells = decode_cells(&codes)?;
        Ok(())
    }

    /// Replaces the 9 macroboard statuses. On error nothing changes.
    pub fn load_macro_statuses(&mut self, s: &str) -> Result<()> {
        let codes = parse_codes("macroboard", s, 9)?;
        self.macroboard = decode_statuses(&codes)?;
        Ok(())
    }

    /// Full replace of cells and statuses. Both inputs are validated before
    /// either is applied.
    pub fn apply_update(&mut self, cells: &[i64], statuses: &[i64]) -> Result<()> {
        let new_cells = decode_cells(cells)?;
        let new_macro = decode_statuses(statuses)?;
        self.cells = new_cells;
        self.macroboard = new_macro;
        Ok(())
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell { self.cells[y][x] }

    /// Raw statuses as last received.
    pub fn macroboard(&self) -> &MacroBoard { &self.macroboard }

    /// Scratch copy of the microboard at macro coordinates `(mx, my)`.
    pub fn microboard(&self, mx: usize, my: usize) -> Microboard {
        let mut micro = Microboard::new();
        for y in 0..3 {
            for x in 0..3 {
                micro.set(x, y, self.cells[my * 3 + y][mx * 3 + x]);
            }
        }
        micro
    }

    /// Statuses with every open slot whose microboard is already full
    /// rewritten to `Disabled`.
    pub fn valid_macro_statuses(&self) -> MacroBoard {
        let mut valid = self.macroboard;
        for my in 0..3 {
            for mx in 0..3 {
                if valid.get(mx, my).is_open() && self.microboard(mx, my).is_full() {
                    debug!("microboard ({},{}) is full but reported open", mx, my);
                    valid.set(mx, my, MacroStatus::Disabled);
                }
            }
        }
        valid
    }

    /// The forced microboard, if exactly one slot carries the sentinel and
    /// that board can still be played. `None` means free choice.
    pub fn active_microboard(&self) -> Option<Move> {
        let valid = self.valid_macro_statuses();
        match self.macroboard.active_slots().as_slice() {
            [only] if valid.get(only.x, only.y).is_open() => Some(*only),
            _ => None,
        }
    }

    /// Microboards the next move may go into. Flagged boards that are still
    /// playable are the only ones offered; every open board is offered only
    /// when the feed flagged none or all flagged boards turned out full.
    pub fn candidate_microboards(&self) -> Vec<Move> {
        if let Some(forced) = self.active_microboard() { return vec![forced]; }
        let valid = self.valid_macro_statuses();
        let flagged = valid.active_slots();
        if flagged.is_empty() { valid.open_slots() } else { flagged }
    }

    pub fn is_in_active_microboard(&self, x: usize, y: usize) -> bool {
        let (micro, _) = Move::new(x, y).split_global();
        self.candidate_microboards().contains(&micro)
    }

    /// Every empty cell of every candidate microboard, in global row-major order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let candidates = self.candidate_microboards();
        let mut moves = Vec::new();
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.cells[y][x].is_empty() && candidates.contains(&Move::new(x / 3, y / 3)) {
                    moves.push(Move::new(x, y));
                }
            }
        }
        moves
    }

    pub fn is_full(&self) -> bool { self.cells.iter().flatten().all(|c| !c.is_empty()) }

    pub fn is_empty(&self) -> bool { self.cells.iter().flatten().all(|c| c.is_empty()) }
}

impl fmt::Display for CompositeBoard {
    /// Comma separated row-major cell codes, the same layout the feed uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = self.cells.iter().flatten().map(|c| c.code().to_string()).collect();
        write!(f, "{}", codes.join(","))
    }
}
