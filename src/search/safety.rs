use log::debug;
use crate::board::{CompositeBoard, MacroBoard, Microboard, Move, Outcome, Player};

/// Whether playing `local` inside the microboard at `at` sends the opponent
/// into a forced microboard where they hold no open line of `threshold`
/// marks.
///
/// A local move `(x, y)` forces the opponent into microboard `(x, y)`. If
/// that slot is not open the opponent gets a free choice, which never counts
/// as safe. When the move points back at `at` the board is judged after our
/// mark, and it must stay undecided.
pub fn is_safe_destination(
    board: &CompositeBoard,
    valid: &MacroBoard,
    at: Move,
    micro: &Microboard,
    local: Move,
    me: Player,
    threshold: usize,
) -> bool {
    if !valid.get(local.x, local.y).is_open() { return false; }
    let destination = if local == at {
        let after = micro.with_mark(local, me);
        if after.outcome() != Outcome::Undecided { return false; }
        after
    } else {
        board.microboard(local.x, local.y)
    };
    !destination.has_partial_line(me.opponent(), threshold)
}

/// Every legal local move in `micro` that passes [`is_safe_destination`],
/// row-major.
pub fn safe_moves(
    board: &CompositeBoard,
    valid: &MacroBoard,
    at: Move,
    micro: &Microboard,
    me: Player,
    threshold: usize,
) -> Vec<Move> {
    micro
        .legal_moves()
        .into_iter()
        .filter(|&local| is_safe_destination(board, valid, at, micro, local, me, threshold))
        .collect()
}

/// Picks the safe move to play in the microboard at `at`, if there is one.
/// With several safe moves the best-ranked one wins.
pub fn pick_safe_move(
    board: &CompositeBoard,
    valid: &MacroBoard,
    at: Move,
    micro: &Microboard,
    ranked: &[Move],
    me: Player,
    threshold: usize,
) -> Option<Move> {
    let safe = safe_moves(board, valid, at, micro, me, threshold);
    debug!("safe moves in microboard {}: {:?}", at, safe);
    match safe.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => ranked.iter().copied().find(|m| safe.contains(m)).or_else(|| safe.first().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_that_wins_own_board_is_not_a_forced_destination() {
        let mut board = CompositeBoard::new();
        let mut cells = vec![0i64; 81];
        // Player 1 has (0,0) and (1,0) in microboard (2,0); local (2,0) wins it.
        cells[6] = 1;
        cells[7] = 1;
        let statuses = vec![0, 0, -1, 0, 0, 0, 0, 0, 0];
        board.apply_update(&cells, &statuses).unwrap();
        let at = Move::new(2, 0);
        let micro = board.microboard(at.x, at.y);
        let valid = board.valid_macro_statuses();
        let safe = safe_moves(&board, &valid, at, &micro, Player::One, 2);
        assert!(!safe.contains(&Move::new(2, 0)));
        assert!(safe.contains(&Move::new(1, 1)));
    }

    #[test]
    fn decided_destination_is_never_safe() {
        let mut board = CompositeBoard::new();
        let statuses = vec![0, 0, 0, 0, 3, 0, 0, 0, 0];
        board.apply_update(&vec![0i64; 81], &statuses).unwrap();
        let valid = board.valid_macro_statuses();
        let micro = board.microboard(0, 0);
        assert!(!is_safe_destination(&board, &valid, Move::new(0, 0), &micro, Move::new(1, 1), Player::Two, 2));
        assert!(is_safe_destination(&board, &valid, Move::new(0, 0), &micro, Move::new(2, 2), Player::Two, 2));
    }
}
