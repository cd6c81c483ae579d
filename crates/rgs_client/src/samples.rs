//! Bundled sample books for offline play.
//!
//! Two fixed sets, one per scenario. The lists are built once and handed out
//! by reference; callers clone a book's events before mutating them.

use once_cell::sync::Lazy;

use book_events::{Board, BookEvent, GameType, Position, SymbolCell, WinInfoItem};

#[derive(Debug, Clone)]
pub struct DebugBook {
    pub id: u32,
    pub events: Vec<BookEvent>,
    pub payout_multiplier: f64,
}

/// Board from column-major symbol names, 5 reels by 3 rows.
fn board(columns: [[&str; 3]; 5]) -> Board {
    columns
        .iter()
        .map(|column| column.iter().copied().map(SymbolCell::named).collect())
        .collect()
}

fn reveal(board: Board, game_type: GameType, anticipation: [u32; 5]) -> BookEvent {
    BookEvent::Reveal {
        board,
        padding_positions: vec![0; 5],
        game_type,
        anticipation: anticipation.to_vec(),
    }
}

fn positions(coords: &[(usize, usize)]) -> Vec<Position> {
    coords
        .iter()
        .map(|&(reel, row)| Position { reel, row })
        .collect()
}

pub static BASE_BOOKS: Lazy<Vec<DebugBook>> = Lazy::new(|| {
    vec![
        // Dead spin.
        DebugBook {
            id: 1,
            payout_multiplier: 0.0,
            events: vec![
                reveal(
                    board([
                        ["A", "E", "D"],
                        ["H", "B", "G"],
                        ["C", "I", "X"],
                        ["D", "A", "F"],
                        ["G", "C", "B"],
                    ]),
                    GameType::Basegame,
                    [0; 5],
                ),
                BookEvent::SetTotalWin { amount: 0 },
                BookEvent::FinalWin,
            ],
        },
        // Three-of-a-kind line win.
        DebugBook {
            id: 2,
            payout_multiplier: 0.15,
            events: vec![
                reveal(
                    board([
                        ["E", "A", "D"],
                        ["E", "B", "G"],
                        ["E", "I", "X"],
                        ["D", "A", "F"],
                        ["G", "C", "B"],
                    ]),
                    GameType::Basegame,
                    [0; 5],
                ),
                BookEvent::WinInfo {
                    wins: vec![WinInfoItem {
                        positions: positions(&[(0, 0), (1, 0), (2, 0)]),
                        amount: 150_000,
                        symbol: Some("E".into()),
                    }],
                },
                BookEvent::SetWin {
                    amount: 150_000,
                    win_level: 1,
                },
                BookEvent::SetTotalWin { amount: 150_000 },
                BookEvent::FinalWin,
            ],
        },
        // Wild-assisted medium win.
        DebugBook {
            id: 3,
            payout_multiplier: 1.2,
            events: vec![
                reveal(
                    board([
                        ["H", "A", "D"],
                        ["H", "B", "G"],
                        ["W2", "I", "X"],
                        ["H", "A", "F"],
                        ["G", "C", "B"],
                    ]),
                    GameType::Basegame,
                    [0; 5],
                ),
                BookEvent::WinInfo {
                    wins: vec![WinInfoItem {
                        positions: positions(&[(0, 0), (1, 0), (2, 0), (3, 0)]),
                        amount: 1_200_000,
                        symbol: Some("H".into()),
                    }],
                },
                BookEvent::SetWin {
                    amount: 1_200_000,
                    win_level: 2,
                },
                BookEvent::SetTotalWin { amount: 1_200_000 },
                BookEvent::FinalWin,
            ],
        },
    ]
});

pub static BONUS_BOOKS: Lazy<Vec<DebugBook>> = Lazy::new(|| {
    vec![
        // Three scatters into an eight-spin bonus with a growing multiplier.
        DebugBook {
            id: 1,
            payout_multiplier: 17.0,
            events: vec![
                reveal(
                    board([
                        ["A", "E", "S"],
                        ["E", "S", "E"],
                        ["S", "E", "W2"],
                        ["H", "A", "D"],
                        ["I", "A", "D"],
                    ]),
                    GameType::Basegame,
                    [0, 0, 1, 2, 3],
                ),
                BookEvent::FreeSpinTrigger {
                    total_fs: 8,
                    positions: positions(&[(0, 2), (1, 1), (2, 0)]),
                },
                BookEvent::UpdateFreeSpin { amount: 0, total: 8 },
                reveal(
                    board([
                        ["A", "E", "D"],
                        ["E", "E", "G"],
                        ["W2", "X", "X"],
                        ["H", "A", "D"],
                        ["I", "A", "D"],
                    ]),
                    GameType::Freegame,
                    [0; 5],
                ),
                BookEvent::UpdateGlobalMult {
                    multiplier: Some(2.0),
                    value: None,
                    global_mult: None,
                    visible: None,
                    show: None,
                },
                BookEvent::WinInfo {
                    wins: vec![WinInfoItem {
                        positions: positions(&[(0, 1), (1, 0), (2, 0)]),
                        amount: 600_000,
                        symbol: Some("E".into()),
                    }],
                },
                BookEvent::SetWin {
                    amount: 600_000,
                    win_level: 1,
                },
                BookEvent::UpdateFreeSpin { amount: 1, total: 8 },
                reveal(
                    board([
                        ["E", "E", "D"],
                        ["E", "E", "G"],
                        ["W2", "X", "X"],
                        ["H", "A", "D"],
                        ["I", "A", "D"],
                    ]),
                    GameType::Freegame,
                    [0; 5],
                ),
                BookEvent::UpdateGlobalMult {
                    multiplier: Some(4.0),
                    value: None,
                    global_mult: None,
                    visible: None,
                    show: None,
                },
                BookEvent::WinInfo {
                    wins: vec![WinInfoItem {
                        positions: positions(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]),
                        amount: 16_400_000,
                        symbol: Some("E".into()),
                    }],
                },
                BookEvent::SetWin {
                    amount: 16_400_000,
                    win_level: 4,
                },
                BookEvent::SetTotalWin { amount: 17_000_000 },
                BookEvent::FreeSpinEnd {
                    amount: 17_000_000,
                    win_level: 4,
                },
                BookEvent::FinalWin,
            ],
        },
        // Bonus resumed mid-round from a snapshot.
        DebugBook {
            id: 2,
            payout_multiplier: 3.4,
            events: vec![
                BookEvent::CreateBonusSnapshot {
                    book_events: vec![
                        BookEvent::FreeSpinTrigger {
                            total_fs: 8,
                            positions: positions(&[(0, 2), (1, 1), (2, 0)]),
                        },
                        BookEvent::UpdateFreeSpin { amount: 4, total: 8 },
                        BookEvent::SetTotalWin { amount: 2_000_000 },
                        BookEvent::UpdateGlobalMult {
                            multiplier: Some(3.0),
                            value: None,
                            global_mult: None,
                            visible: None,
                            show: None,
                        },
                    ],
                },
                BookEvent::UpdateFreeSpin { amount: 5, total: 8 },
                reveal(
                    board([
                        ["A", "E", "D"],
                        ["E", "E", "G"],
                        ["W2", "X", "X"],
                        ["H", "A", "D"],
                        ["I", "A", "D"],
                    ]),
                    GameType::Freegame,
                    [0; 5],
                ),
                BookEvent::WinInfo {
                    wins: vec![WinInfoItem {
                        positions: positions(&[(0, 1), (1, 0), (2, 0)]),
                        amount: 1_400_000,
                        symbol: Some("E".into()),
                    }],
                },
                BookEvent::SetWin {
                    amount: 1_400_000,
                    win_level: 2,
                },
                BookEvent::SetTotalWin { amount: 3_400_000 },
                BookEvent::FreeSpinEnd {
                    amount: 3_400_000,
                    win_level: 3,
                },
                BookEvent::FinalWin,
            ],
        },
    ]
});
