//! Shared event vocabulary for the book playback engine.
//!
//! A "book" is a server-authored, ordered description of one round's outcome,
//! replayed client-side as a sequence of typed events. This crate defines:
//!
//! - [`BookEvent`]: the tagged union of every book event the server emits,
//!   with an `Unknown` catch-all so future event types never crash playback.
//! - [`EmitterEvent`]: the stable renderer/audio/UI protocol broadcast
//!   through the emitter while a book plays.
//! - [`decode::decode_events`]: the boundary step that turns loose external
//!   JSON into the strict internal model.

pub mod board;
pub mod book;
pub mod decode;
pub mod emitter_event;
pub mod win_level;

pub use board::{Board, GameType, Position, SymbolCell, SCATTER};
pub use book::{BookEvent, Round, RoundEnvelope, WinInfoItem};
pub use decode::decode_events;
pub use emitter_event::EmitterEvent;
pub use win_level::{WinLevelData, WinLevelKind};
