//! Board engine tests: line detection, clearing and the play-through
//! scenarios that keep one board alive across scoring events.

use proptest::prelude::*;

use gridlock::board::{completed_lines, first_completed, Board, Cells, LinePattern, Mark, LINE_PATTERNS};

fn cell() -> impl Strategy<Value = Option<Mark>> {
    prop_oneof![Just(None), Just(Some(Mark::X)), Just(Some(Mark::O))]
}

fn cells() -> impl Strategy<Value = Cells> {
    prop::array::uniform9(cell())
}

/// Naive line scan written out independently of `LinePattern::owner`.
fn brute_force_lines(cells: &Cells) -> Vec<(LinePattern, Mark)> {
    let mut found = Vec::new();
    for pattern in LINE_PATTERNS {
        let [a, b, c] = pattern.cells();
        if let (Some(x), Some(y), Some(z)) = (cells[a], cells[b], cells[c]) {
            if x == y && y == z {
                found.push((pattern, x));
            }
        }
    }
    found
}

proptest! {
    /// Line detection agrees with a naive scan, in pattern order.
    #[test]
    fn prop_lines_match_brute_force(cells in cells()) {
        let check = completed_lines(&cells);
        let found: Vec<_> = check.lines().iter().map(|l| (l.pattern, l.mark)).collect();
        prop_assert_eq!(&found, &brute_force_lines(&cells));
        prop_assert_eq!(first_completed(&cells), found.first().map(|(_, mark)| *mark));
    }

    /// Clearing every complete line empties exactly their union and leaves
    /// no complete line behind.
    #[test]
    fn prop_clear_lines_accounting(cells in cells()) {
        let mut board = Board::from_cells(cells);
        let patterns: Vec<_> = board.evaluate_lines().patterns().collect();

        let mut expected: Vec<usize> = patterns.iter().flat_map(|p| p.cells()).collect();
        expected.sort_unstable();
        expected.dedup();

        let cleared = board.clear_lines(&patterns);
        prop_assert_eq!(cleared.to_vec(), expected.clone());

        for i in 0..9 {
            if expected.contains(&i) {
                prop_assert_eq!(board.get(i), None);
            } else {
                prop_assert_eq!(board.get(i), cells[i]);
            }
        }
        prop_assert!(board.evaluate_lines().is_empty());
        prop_assert_eq!(board.cleared_lines(), &patterns[..]);
    }

    /// Available moves are exactly the empty cells, ascending.
    #[test]
    fn prop_available_moves(cells in cells()) {
        let board = Board::from_cells(cells);
        let moves = board.available_moves();
        prop_assert!(moves.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(moves.len(), cells.iter().filter(|c| c.is_none()).count());
        prop_assert_eq!(board.is_full(), moves.is_empty());
        for i in moves {
            prop_assert!(board.is_valid_move(i));
        }
    }
}

#[test]
fn test_top_row_then_play_continues() {
    let mut board = Board::new();
    for (index, mark) in [(0, Mark::X), (4, Mark::O), (1, Mark::X), (8, Mark::O), (2, Mark::X)] {
        assert!(board.apply_move(index, mark));
    }

    let check = board.evaluate_lines();
    assert_eq!(check.patterns_for(Mark::X), vec![LinePattern([0, 1, 2])]);
    assert!(check.patterns_for(Mark::O).is_empty());

    let cleared = board.clear_lines(&check.patterns_for(Mark::X));
    assert_eq!(cleared.as_slice(), &[0, 1, 2]);

    // Opponent marks survive; freed cells are playable again
    assert_eq!(board.get(4), Some(Mark::O));
    assert_eq!(board.get(8), Some(Mark::O));
    assert!(board.is_valid_move(0));
    assert_eq!(board.to_string(), "...\n.O.\n..O\n");
}

#[test]
fn test_shared_cell_cleared_once() {
    // X completes row [0,1,2] and column [0,3,6] at once
    let mut board = Board::new();
    for index in [1, 2, 3, 6, 0] {
        board.apply_move(index, Mark::X);
    }
    board.apply_move(4, Mark::O);

    let check = board.evaluate_lines();
    assert_eq!(check.len(), 2);
    let cleared = board.clear_lines(&check.patterns().collect::<Vec<_>>());
    assert_eq!(cleared.as_slice(), &[0, 1, 2, 3, 6]);
    assert_eq!(board.get(4), Some(Mark::O));
}

#[test]
fn test_both_marks_can_complete_lines() {
    let cells: Cells = [
        Some(Mark::X), Some(Mark::X), Some(Mark::X),
        Some(Mark::O), Some(Mark::O), Some(Mark::O),
        None, None, None,
    ];
    let check = completed_lines(&cells);
    assert_eq!(check.scorers().collect::<Vec<_>>(), vec![Mark::X, Mark::O]);
    assert_eq!(check.patterns_for(Mark::O), vec![LinePattern([3, 4, 5])]);
}

#[test]
fn test_invalid_moves_leave_board_untouched() {
    let mut board = Board::new();
    assert!(board.apply_move(4, Mark::X));
    assert!(!board.apply_move(4, Mark::O));
    assert!(!board.apply_move(9, Mark::O));
    assert_eq!(board.get(4), Some(Mark::X));
    assert_eq!(board.available_moves().len(), 8);
}

#[test]
fn test_reset_forgets_history() {
    let mut board = Board::new();
    for index in [0, 1, 2] {
        board.apply_move(index, Mark::O);
    }
    board.clear_lines(&[LinePattern([0, 1, 2])]);
    assert_eq!(board.cleared_lines().len(), 1);

    board.apply_move(5, Mark::X);
    board.reset();
    assert!(board.is_empty());
    assert!(board.cleared_lines().is_empty());
}

#[test]
fn test_off_board_pattern_clears_only_board_cells() {
    let mut board = Board::new();
    for index in [0, 4] {
        board.apply_move(index, Mark::X);
    }

    let cleared = board.clear_lines(&[LinePattern([9, 0, 0])]);
    assert_eq!(cleared.as_slice(), &[0]);
    assert_eq!(board.get(0), None);
    assert_eq!(board.get(4), Some(Mark::X));
}
