use pretty_assertions::assert_eq;
use uttt_bot::board::{Cell, CompositeBoard, MacroStatus, Move, Player};
use uttt_bot::Error;

fn csv(codes: &[i64]) -> String {
    codes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(",")
}

fn idx(x: usize, y: usize) -> usize { y * 9 + x }

#[test]
fn forced_microboard_limits_legal_moves() {
    let mut b = CompositeBoard::new();
    let mut cells = vec![0i64; 81];
    cells[idx(4, 7)] = 1;
    cells[idx(0, 0)] = 2;
    let mut statuses = vec![0i64; 9];
    statuses[2 * 3 + 1] = -1;
    b.apply_update(&cells, &statuses).expect("valid update");

    assert_eq!(b.active_microboard(), Some(Move::new(1, 2)));
    let moves = b.legal_moves();
    assert_eq!(moves.len(), 8);
    for m in &moves {
        assert!((3..6).contains(&m.x) && (6..9).contains(&m.y), "{} outside forced region", m);
        assert!(b.is_in_active_microboard(m.x, m.y));
    }
    assert!(!moves.contains(&Move::new(4, 7)));
    assert!(!b.is_in_active_microboard(0, 1));
}

#[test]
fn free_choice_skips_decided_microboards() {
    let mut b = CompositeBoard::new();
    let statuses: [i64; 9] = [0, 1, 0, 3, 0, 0, 0, 0, 2];
    b.apply_update(&vec![0; 81], &statuses).expect("valid update");
    assert_eq!(b.active_microboard(), None);
    let moves = b.legal_moves();
    assert_eq!(moves.len(), 6 * 9);
    for m in moves {
        let (micro, _) = m.split_global();
        assert!(b.macroboard().get(micro.x, micro.y).is_open(), "{} is in a decided board", m);
    }
}

#[test]
fn loads_cells_with_either_separator() {
    let mut codes = vec![0i64; 81];
    codes[idx(3, 0)] = 1;
    codes[idx(8, 8)] = 2;
    let mut text = csv(&codes);
    // mix in semicolons between rows
    text = text.replacen(",", ";", 9);

    let mut b = CompositeBoard::new();
    b.load_cells(&text).expect("semicolons accepted");
    assert_eq!(b.cell(3, 0), Cell::Taken(Player::One));
    assert_eq!(b.cell(8, 8), Cell::Taken(Player::Two));
    assert_eq!(b.to_string(), csv(&codes));
}

#[test]
fn microboard_slice_uses_macro_coordinates() {
    let mut codes = vec![0i64; 81];
    codes[idx(6, 3)] = 1; // microboard (2,1), local (0,0)
    codes[idx(8, 5)] = 2; // microboard (2,1), local (2,2)
    codes[idx(5, 3)] = 1; // microboard (1,1)
    let mut b = CompositeBoard::new();
    b.load_cells(&csv(&codes)).unwrap();
    let m = b.microboard(2, 1);
    assert!(m.has_mark(0, 0, Player::One));
    assert!(m.has_mark(2, 2, Player::Two));
    assert_eq!(m.filled_count(), 2);
    assert_eq!(b.microboard(1, 1).filled_count(), 1);
}

#[test]
fn malformed_updates_leave_board_untouched() {
    let mut b = CompositeBoard::new();
    let mut codes = vec![0i64; 81];
    codes[0] = 1;
    b.load_cells(&csv(&codes)).unwrap();
    b.load_macro_statuses("-1,0,0,0,0,0,0,0,0").unwrap();
    let before = b.clone();

    assert!(matches!(b.load_cells(&csv(&codes[..80])), Err(Error::MalformedUpdate { .. })));
    assert!(matches!(b.load_cells(&format!("{},x", csv(&codes[..80]))), Err(Error::MalformedUpdate { .. })));
    assert!(b.load_macro_statuses("0,0,0").is_err());
    assert!(b.load_macro_statuses("0,0,0,0,0,0,0,0,0,0").is_err());
    assert!(b.load_macro_statuses("0,0,0,0,7,0,0,0,0").is_err());
    // a bad macroboard must not let a good field through either
    assert!(b.apply_update(&vec![0; 81], &[0; 8]).is_err());
    assert_eq!(b, before);
}

#[test]
fn full_open_microboard_is_disabled() {
    let mut codes = vec![0i64; 81];
    // fill microboard (0,0) without a line
    let pattern = [1, 2, 1, 2, 1, 2, 2, 1, 2];
    for (i, &c) in pattern.iter().enumerate() {
        codes[idx(i % 3, i / 3)] = c;
    }
    let mut b = CompositeBoard::new();
    b.load_cells(&csv(&codes)).unwrap();
    b.load_macro_statuses("-1,0,0,0,0,0,0,0,-1").unwrap();
    let valid = b.valid_macro_statuses();
    assert_eq!(valid.get(0, 0), MacroStatus::Disabled);
    assert_eq!(valid.get(1, 0), MacroStatus::Open);
    // raw feed is kept as received
    assert_eq!(b.macroboard().get(0, 0), MacroStatus::Active);
}

#[test]
fn sole_sentinel_on_full_board_means_free_choice() {
    let mut codes = vec![0i64; 81];
    let pattern = [1, 2, 1, 2, 1, 2, 2, 1, 2];
    for (i, &c) in pattern.iter().enumerate() {
        codes[idx(i % 3, i / 3)] = c;
    }
    let mut b = CompositeBoard::new();
    b.load_cells(&csv(&codes)).unwrap();
    b.load_macro_statuses("-1,0,0,0,0,0,0,0,0").unwrap();
    assert_eq!(b.active_microboard(), None);
    assert_eq!(b.candidate_microboards().len(), 8);
}

#[test]
fn several_sentinels_restrict_free_choice() {
    let mut b = CompositeBoard::new();
    b.apply_update(&vec![0; 81], &[-1, 0, 0, 0, -1, 0, 0, 0, -1]).unwrap();
    assert_eq!(b.active_microboard(), None);
    assert_eq!(b.candidate_microboards(), vec![Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)]);
    assert_eq!(b.legal_moves().len(), 27);
}

#[test]
fn full_flagged_board_leaves_choice_within_the_other_flagged_boards() {
    let mut codes = vec![0i64; 81];
    // microboard (0,0) full with no line
    for (i, p) in [1, 2, 1, 2, 1, 2, 2, 1, 2].into_iter().enumerate() {
        codes[idx(i % 3, i / 3)] = p;
    }
    let mut b = CompositeBoard::new();
    b.apply_update(&codes, &[-1, -1, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    assert_eq!(b.active_microboard(), None);
    assert_eq!(b.candidate_microboards(), vec![Move::new(1, 0)]);
    let legal = b.legal_moves();
    assert_eq!(legal.len(), 9);
    assert!(legal.iter().all(|m| (3..6).contains(&m.x) && m.y < 3), "{:?}", legal);
}

#[test]
fn reload_is_idempotent() {
    let mut cells = vec![0i64; 81];
    cells[idx(4, 4)] = 1;
    cells[idx(1, 2)] = 2;
    let statuses: [i64; 9] = [0, 0, 0, 0, -1, 0, 0, 0, 0];
    let mut b = CompositeBoard::new();
    b.apply_update(&cells, &statuses).unwrap();
    let once = b.clone();
    b.apply_update(&cells, &statuses).unwrap();
    assert_eq!(b, once);
    assert_eq!(b.legal_moves(), once.legal_moves());
    assert_eq!(b.to_string(), once.to_string());
}

#[test]
fn whole_board_full_and_empty() {
    let mut b = CompositeBoard::new();
    assert!(b.is_empty());
    b.load_cells(&csv(&vec![1; 81])).unwrap();
    assert!(b.is_full());
    b.load_macro_statuses("0,0,0,0,0,0,0,0,0").unwrap();
    assert!(b.legal_moves().is_empty());
}
