//! Debug round synthesizer.
//!
//! Produces `{ round: { id, events } }` envelopes shaped exactly like live
//! server responses, built from the bundled sample books. Selection is
//! driven by query params so QA can pin a specific book or force a scatter
//! without waiting for random occurrence.

use rand::Rng;
use tracing::{debug, warn};

use book_events::{BookEvent, Round, RoundEnvelope, SymbolCell};

use crate::params::QueryParams;
use crate::samples::{DebugBook, BASE_BOOKS, BONUS_BOOKS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Base,
    Bonus,
}

impl Scenario {
    fn label(self) -> &'static str {
        match self {
            Scenario::Base => "base",
            Scenario::Bonus => "bonus",
        }
    }
}

/// Alias table for the `scenario` param. `random`, unrecognized and absent
/// values all coin-flip rather than erroring.
fn resolve_scenario(value: Option<&str>) -> Scenario {
    let coin_flip = || {
        if rand::rng().random_bool(0.5) {
            Scenario::Base
        } else {
            Scenario::Bonus
        }
    };
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("bonus") | Some("fs") | Some("freespin") | Some("freegame") => Scenario::Bonus,
        Some("base") | Some("default") => Scenario::Base,
        _ => coin_flip(),
    }
}

struct PickOptions<'a> {
    book_id: Option<&'a str>,
    book_index: Option<&'a str>,
    random: bool,
    prefer_random: bool,
}

/// Book selection precedence: explicit id beats index beats randomness beats
/// the first book. Returns `None` only for an empty list.
fn pick_book<'a>(books: &'a [DebugBook], opts: &PickOptions<'_>) -> Option<&'a DebugBook> {
    if books.is_empty() {
        return None;
    }

    if let Some(id) = opts.book_id.and_then(|raw| raw.parse::<i64>().ok()) {
        if let Some(book) = books.iter().find(|book| i64::from(book.id) == id) {
            return Some(book);
        }
    }

    if let Some(index) = opts.book_index.and_then(|raw| raw.parse::<i64>().ok()) {
        let wrapped = index.rem_euclid(books.len() as i64) as usize;
        return Some(&books[wrapped]);
    }

    let explicit_selection = opts.book_id.is_some() || opts.book_index.is_some();
    if opts.random || (opts.prefer_random && !explicit_selection) {
        let index = rand::rng().random_range(0..books.len());
        return Some(&books[index]);
    }

    Some(&books[0])
}

fn synthesize(books: &[DebugBook], scenario: Scenario, params: &QueryParams) -> RoundEnvelope {
    let opts = PickOptions {
        book_id: params.get_nonempty("bookid"),
        book_index: params.get_nonempty("bookindex"),
        random: params.get("random") == Some("1"),
        prefer_random: scenario == Scenario::Base,
    };

    let Some(book) = pick_book(books, &opts) else {
        warn!(scenario = scenario.label(), "no sample books available");
        return RoundEnvelope {
            round: Round {
                id: Some("debug-empty".into()),
                events: Vec::new(),
            },
        };
    };
    debug!(scenario = scenario.label(), book_id = book.id, "synthesized debug round");

    // Each play gets its own copy so repeated plays of the same book never
    // share mutable event data.
    let mut events = book.events.clone();
    if let Some(reel) = params
        .get_nonempty("forcescatter")
        .and_then(|raw| raw.parse::<i64>().ok())
    {
        force_scatter(&mut events, reel);
    }

    RoundEnvelope {
        round: Round {
            id: Some(format!("debug-{}-{}", scenario.label(), book.id)),
            events,
        },
    }
}

/// Builds a debug round from the launch params.
pub fn debug_play(params: &QueryParams) -> RoundEnvelope {
    let scenario = resolve_scenario(params.get("scenario"));
    let books: &[DebugBook] = match scenario {
        Scenario::Base => &BASE_BOOKS,
        Scenario::Bonus => &BONUS_BOOKS,
    };
    synthesize(books, scenario, params)
}

/// Rewrites the first reveal so `requested_reel` is guaranteed a scatter.
///
/// Accepts both 0-based and 1-based reel indices: in-range 0-based values are
/// used as-is, values in `1..=reels` are shifted down by one, anything else
/// clamps into range. The scatter lands on the first row without one (row 0
/// when the column already has a scatter), and that reel's anticipation is
/// bumped to at least 1.
pub fn force_scatter(events: &mut [BookEvent], requested_reel: i64) {
    let Some(BookEvent::Reveal {
        board,
        anticipation,
        ..
    }) = events
        .iter_mut()
        .find(|event| matches!(event, BookEvent::Reveal { .. }))
    else {
        warn!("forceScatter requested but the round has no reveal event");
        return;
    };
    if board.is_empty() {
        return;
    }

    let reels = board.len() as i64;
    let reel = if (0..reels).contains(&requested_reel) {
        requested_reel
    } else if (1..=reels).contains(&requested_reel) {
        requested_reel - 1
    } else {
        requested_reel.clamp(0, reels - 1)
    } as usize;

    let column = &mut board[reel];
    let row = column
        .iter()
        .position(|cell| !cell.is_scatter())
        .unwrap_or(0);
    column[row] = SymbolCell::scatter();

    if anticipation.len() < board.len() {
        anticipation.resize(board.len(), 0);
    }
    if anticipation[reel] < 1 {
        anticipation[reel] = 1;
    }
}
