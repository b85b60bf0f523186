use std::fmt;
use super::{Cell, Microboard, Move, Player};
use crate::config::DisabledScoring;

/// Status of one microboard as reported on the macroboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MacroStatus {
    /// `-1` on the wire: this microboard is where the next move must go.
    Active,
    #[default]
    Open,
    Won(Player),
    Tied,
    /// Full without a recorded result. Kept apart from `Tied`.
    Disabled,
}

impl MacroStatus {
    /// Decodes -1 / 0 / 1 / 2 / 3 and the full-board codes 4 and 9.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(MacroStatus::Active),
            0 => Some(MacroStatus::Open),
            1 => Some(MacroStatus::Won(Player::One)),
            2 => Some(MacroStatus::Won(Player::Two)),
            3 => Some(MacroStatus::Tied),
            4 | 9 => Some(MacroStatus::Disabled),
            _ => None,
        }
    }

    pub fn code(self) -> i8 {
        match self {
            MacroStatus::Active => -1,
            MacroStatus::Open => 0,
            MacroStatus::Won(p) => p.id() as i8,
            MacroStatus::Tied => 3,
            MacroStatus::Disabled => 9,
        }
    }

    /// Still playable: no result has been decided.
    pub fn is_open(self) -> bool { matches!(self, MacroStatus::Active | MacroStatus::Open) }
}

/// 3x3 grid of microboard statuses, row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MacroBoard {
    slots: [MacroStatus; 9],
}

impl MacroBoard {
    pub fn new() -> Self { Self::default() }

    pub fn from_slots(slots: [MacroStatus; 9]) -> Self { Self { slots } }

    pub fn get(&self, x: usize, y: usize) -> MacroStatus { self.slots[y * 3 + x] }

    pub fn set(&mut self, x: usize, y: usize, status: MacroStatus) { self.slots[y * 3 + x] = status; }

    /// Slots that satisfy `pred`, row-major.
    fn slots_where(&self, pred: impl Fn(MacroStatus) -> bool) -> Vec<Move> {
        let mut out = Vec::new();
        for y in 0..3 {
            for x in 0..3 {
                if pred(self.get(x, y)) { out.push(Move::new(x, y)); }
            }
        }
        out
    }

    /// Slots carrying the forced-play sentinel.
    pub fn active_slots(&self) -> Vec<Move> { self.slots_where(|s| s == MacroStatus::Active) }

    pub fn open_slots(&self) -> Vec<Move> { self.slots_where(MacroStatus::is_open) }

    /// Projects the statuses onto a 3x3 grid so the cell ranking passes can
    /// run over the macro game: open slots are empty, won slots carry the
    /// winner's mark, ties are closed. Disabled slots follow `disabled`.
    pub fn to_grid(&self, disabled: DisabledScoring) -> Microboard {
        let mut grid = Microboard::new();
        for y in 0..3 {
            for x in 0..3 {
                let cell = match self.get(x, y) {
                    MacroStatus::Active | MacroStatus::Open => Cell::Empty,
                    MacroStatus::Won(p) => Cell::Taken(p),
                    MacroStatus::Tied => Cell::Closed,
                    MacroStatus::Disabled => match disabled {
                        DisabledScoring::AsTie => Cell::Closed,
                        DisabledScoring::AsUndecided => Cell::Empty,
                    },
                };
                grid.set(x, y, cell);
            }
        }
        grid
    }
}

impl fmt::Display for MacroBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..3 {
            let row: Vec<String> = (0..3).map(|x| self.get(x, y).code().to_string()).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
