//! Book playback: the handler map that translates server outcome events into
//! emitter broadcasts and game-state mutations, and the sequencer that drives
//! a book through it in strict order.

pub mod error;
pub mod handlers;
pub mod sequencer;
pub mod state;
pub mod win_levels;

pub use error::PlaybackError;
pub use handlers::{BookEventContext, BookEventHandlers};
pub use sequencer::BookPlayer;
pub use state::{new_shared_state, GameState, SharedGameState};
pub use win_levels::win_level_data;
