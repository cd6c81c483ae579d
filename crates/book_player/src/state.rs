//! Explicit game state owned by the handler map.
//!
//! Mutation contract: only book event handlers write; the renderer and host
//! only read. The state is passed into the handler map's construction rather
//! than living in module-level globals.

use std::sync::Arc;
use tokio::sync::RwLock;

use book_events::GameType;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub game_type: GameType,
    pub global_multiplier: f64,
    pub global_multiplier_visible: bool,
    pub free_spin_counter_show: bool,
    pub free_spin_current: u32,
    pub free_spin_total: u32,
    /// Running total win for the current book, as set by `setTotalWin`.
    pub win_book_event_amount: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            game_type: GameType::Basegame,
            global_multiplier: 1.0,
            global_multiplier_visible: false,
            free_spin_counter_show: false,
            free_spin_current: 0,
            free_spin_total: 0,
            win_book_event_amount: 0,
        }
    }
}

pub type SharedGameState = Arc<RwLock<GameState>>;

pub fn new_shared_state() -> SharedGameState {
    Arc::new(RwLock::new(GameState::default()))
}
