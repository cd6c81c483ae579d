//! The book player: drives a round's event list through the handler map in
//! strict order. Event N+1 is never dispatched until event N's handler has
//! returned, including all of its internal `broadcast_async` awaits.

use std::sync::Arc;

use tracing::debug;

use book_events::{BookEvent, EmitterEvent};
use event_emitter::BroadcastEmitter;

use crate::error::PlaybackError;
use crate::handlers::{BookEventContext, BookEventHandlers};
use crate::state::SharedGameState;

pub struct BookPlayer {
    handlers: BookEventHandlers,
}

impl BookPlayer {
    pub fn new(emitter: Arc<BroadcastEmitter<EmitterEvent>>, state: SharedGameState) -> Self {
        Self {
            handlers: BookEventHandlers::new(emitter, state),
        }
    }

    /// Plays a book to completion. Stops at the first failing handler; the
    /// error names the offending event by position and type.
    pub async fn play(&self, book_events: &[BookEvent]) -> Result<(), PlaybackError> {
        let ctx = BookEventContext { book_events };
        for (index, event) in book_events.iter().enumerate() {
            debug!(index, event_type = event.event_type(), "playing book event");
            self.handlers
                .handle(event, ctx)
                .await
                .map_err(|source| PlaybackError::EventFailed {
                    index,
                    event_type: event.event_type(),
                    source,
                })?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::state::new_shared_state;
    use book_events::{GameType, SymbolCell};

    fn reveal(marker: u32) -> BookEvent {
        BookEvent::Reveal {
            board: vec![vec![SymbolCell::named("A"); 3]; 5],
            padding_positions: vec![0; 5],
            game_type: GameType::Basegame,
            anticipation: vec![marker, 0, 0, 0, 0],
        }
    }

    /// Subscribers with deliberately skewed delays must still observe events
    /// in book order, because the player awaits each handler to completion.
    #[tokio::test]
    async fn events_play_strictly_in_order() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        emitter.subscribe("boardSpin", move |event: EmitterEvent| {
            let seen = seen_clone.clone();
            async move {
                if let EmitterEvent::BoardSpin { anticipation, .. } = event {
                    let marker = anticipation[0];
                    // Earlier events sleep longer; order must survive anyway.
                    tokio::time::sleep(Duration::from_millis(30 - 10 * marker as u64)).await;
                    seen.lock().unwrap().push(marker);
                }
                Ok(())
            }
        });

        let player = BookPlayer::new(emitter, new_shared_state());
        player
            .play(&[reveal(0), reveal(1), reveal(2)])
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn unknown_events_are_skipped_and_playback_continues() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let spins = Arc::new(Mutex::new(0u32));

        let spins_clone = spins.clone();
        emitter.subscribe("boardSpin", move |_event: EmitterEvent| {
            let spins = spins_clone.clone();
            async move {
                *spins.lock().unwrap() += 1;
                Ok(())
            }
        });

        let player = BookPlayer::new(emitter, new_shared_state());
        player
            .play(&[reveal(0), BookEvent::Unknown, reveal(1)])
            .await
            .unwrap();

        assert_eq!(*spins.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn handler_failure_halts_playback_with_position() {
        let emitter = Arc::new(BroadcastEmitter::new());
        emitter.subscribe("boardSpin", |_event: EmitterEvent| async {
            Err(event_emitter::EmitterError::Subscriber("renderer detached".into()))
        });

        let player = BookPlayer::new(emitter, new_shared_state());
        let err = player
            .play(&[BookEvent::FinalWin, reveal(0)])
            .await
            .unwrap_err();

        let PlaybackError::EventFailed { index, event_type, .. } = err;
        assert_eq!(index, 1);
        assert_eq!(event_type, "reveal");
    }

    #[tokio::test]
    async fn zero_multiplier_coerces_to_one_and_hides() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[BookEvent::UpdateGlobalMult {
                multiplier: Some(0.0),
                value: None,
                global_mult: None,
                visible: None,
                show: None,
            }])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.global_multiplier, 1.0);
        assert!(!state.global_multiplier_visible);
    }

    #[tokio::test]
    async fn multiplier_fallback_chain_and_visibility_default() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        // `value` is the second spelling in the fallback chain.
        player
            .play(&[BookEvent::UpdateGlobalMult {
                multiplier: None,
                value: Some(3.0),
                global_mult: None,
                visible: None,
                show: None,
            }])
            .await
            .unwrap();

        {
            let state = state.read().await;
            assert_eq!(state.global_multiplier, 3.0);
            assert!(state.global_multiplier_visible);
        }

        // No spelling present at all: keeps the current value.
        player
            .play(&[BookEvent::UpdateGlobalMult {
                multiplier: None,
                value: None,
                global_mult: None,
                visible: Some(false),
                show: None,
            }])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.global_multiplier, 3.0);
        assert!(!state.global_multiplier_visible);
    }

    #[tokio::test]
    async fn free_spin_counter_clamps_to_total() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[BookEvent::UpdateFreeSpin {
                amount: 10,
                total: 8,
            }])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.free_spin_current, 8);
        assert_eq!(state.free_spin_total, 8);
    }

    #[tokio::test]
    async fn absurd_free_spin_amount_still_clamps() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[BookEvent::UpdateFreeSpin {
                amount: u32::MAX,
                total: 8,
            }])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.free_spin_current, 8);
        assert_eq!(state.free_spin_total, 8);
    }

    #[tokio::test]
    async fn free_spin_trigger_enters_freegame() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[BookEvent::FreeSpinTrigger {
                total_fs: 8,
                positions: vec![],
            }])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.game_type, GameType::Freegame);
        assert!(state.free_spin_counter_show);
        assert_eq!(state.free_spin_current, 0);
        assert_eq!(state.free_spin_total, 8);
    }

    #[tokio::test]
    async fn free_spin_end_restores_basegame_and_resets_multiplier() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[
                BookEvent::FreeSpinTrigger {
                    total_fs: 8,
                    positions: vec![],
                },
                BookEvent::UpdateGlobalMult {
                    multiplier: Some(4.0),
                    value: None,
                    global_mult: None,
                    visible: None,
                    show: None,
                },
                BookEvent::FreeSpinEnd {
                    amount: 5000,
                    win_level: 3,
                },
            ])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.game_type, GameType::Basegame);
        assert!(!state.free_spin_counter_show);
        assert_eq!(state.global_multiplier, 1.0);
        assert!(!state.global_multiplier_visible);
    }

    /// Snapshot restoration replays only the latest occurrence of each
    /// restorable event type from the snapshot list.
    #[tokio::test]
    async fn bonus_snapshot_replays_latest_of_each_type() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[BookEvent::CreateBonusSnapshot {
                book_events: vec![
                    BookEvent::FreeSpinTrigger {
                        total_fs: 10,
                        positions: vec![],
                    },
                    BookEvent::SetTotalWin { amount: 100 },
                    BookEvent::UpdateFreeSpin {
                        amount: 2,
                        total: 10,
                    },
                    BookEvent::UpdateFreeSpin {
                        amount: 4,
                        total: 10,
                    },
                    BookEvent::SetTotalWin { amount: 777 },
                    BookEvent::UpdateGlobalMult {
                        multiplier: Some(2.0),
                        value: None,
                        global_mult: None,
                        visible: None,
                        show: None,
                    },
                ],
            }])
            .await
            .unwrap();

        let state = state.read().await;
        assert_eq!(state.game_type, GameType::Freegame);
        assert_eq!(state.free_spin_current, 5);
        assert_eq!(state.free_spin_total, 10);
        assert_eq!(state.win_book_event_amount, 777);
        assert_eq!(state.global_multiplier, 2.0);
        assert!(state.global_multiplier_visible);
    }

    #[tokio::test]
    async fn set_total_win_updates_state_only() {
        let emitter = Arc::new(BroadcastEmitter::new());
        let state = new_shared_state();
        let player = BookPlayer::new(emitter, state.clone());

        player
            .play(&[BookEvent::SetTotalWin { amount: 123_456 }])
            .await
            .unwrap();

        assert_eq!(state.read().await.win_book_event_amount, 123_456);
    }
}
