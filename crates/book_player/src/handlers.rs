//! The book event handler map.
//!
//! One total mapping from event tag to an async handler. Each handler
//! translates a server event into emitter broadcasts and game-state
//! mutations. `broadcast` calls do not block sequencing; every
//! `broadcast_async` is an internal await point that must fully settle
//! before the handler continues.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use book_events::{BookEvent, EmitterEvent, GameType, Position, WinLevelData, WinLevelKind};
use event_emitter::{BroadcastEmitter, EmitterError};

use crate::state::SharedGameState;
use crate::win_levels::win_level_data;

/// Context handed to every handler: the full event list of the round, for
/// look-back operations such as bonus detection and snapshot restoration.
#[derive(Debug, Clone, Copy)]
pub struct BookEventContext<'a> {
    pub book_events: &'a [BookEvent],
}

pub struct BookEventHandlers {
    emitter: Arc<BroadcastEmitter<EmitterEvent>>,
    state: SharedGameState,
}

impl BookEventHandlers {
    pub fn new(emitter: Arc<BroadcastEmitter<EmitterEvent>>, state: SharedGameState) -> Self {
        Self { emitter, state }
    }

    pub fn state(&self) -> &SharedGameState {
        &self.state
    }

    /// Dispatches one book event. Total over the event union: unknown event
    /// types are a logged no-op so playback survives server events this
    /// client predates.
    pub async fn handle(
        &self,
        event: &BookEvent,
        ctx: BookEventContext<'_>,
    ) -> Result<(), EmitterError> {
        match event {
            BookEvent::Reveal {
                board,
                padding_positions,
                game_type,
                anticipation,
            } => {
                self.on_reveal(board, padding_positions, *game_type, anticipation, ctx)
                    .await
            }
            BookEvent::WinInfo { wins } => self.on_win_info(wins).await,
            BookEvent::SetWin { amount, win_level } => self.on_set_win(*amount, *win_level).await,
            BookEvent::SetTotalWin { amount } => self.on_set_total_win(*amount).await,
            BookEvent::FreeSpinTrigger {
                total_fs,
                positions,
            } => self.on_free_spin_trigger(*total_fs, positions).await,
            BookEvent::FreeSpinRetrigger {
                total_fs,
                positions,
            } => self.on_free_spin_retrigger(*total_fs, positions).await,
            BookEvent::UpdateFreeSpin { amount, total } => {
                self.on_update_free_spin(*amount, *total).await
            }
            BookEvent::UpdateGlobalMult {
                multiplier,
                value,
                global_mult,
                visible,
                show,
            } => {
                self.on_update_global_mult(*multiplier, *value, *global_mult, *visible, *show)
                    .await
            }
            BookEvent::FreeSpinEnd { amount, win_level } => {
                self.on_free_spin_end(*amount, *win_level).await
            }
            BookEvent::FinalWin => {
                // Terminal marker: the server sends finalWin to indicate the
                // book is done. Nothing to present.
                Ok(())
            }
            BookEvent::CreateBonusSnapshot { book_events } => {
                self.on_create_bonus_snapshot(book_events).await
            }
            BookEvent::Unknown => {
                debug!("skipping unknown book event");
                Ok(())
            }
        }
    }

    async fn on_reveal(
        &self,
        board: &book_events::Board,
        padding_positions: &[i64],
        game_type: GameType,
        anticipation: &[u32],
        ctx: BookEventContext<'_>,
    ) -> Result<(), EmitterError> {
        let reveal_count = ctx
            .book_events
            .iter()
            .filter(|e| matches!(e, BookEvent::Reveal { .. }))
            .count();
        if reveal_count > 1 {
            // Multiple reveals mean a bonus book; the stop button lets the
            // player skip individual spins.
            self.emitter.broadcast(EmitterEvent::StopButtonEnable);
        }

        self.state.write().await.game_type = game_type;
        self.emitter
            .broadcast_async(EmitterEvent::BoardSpin {
                board: board.clone(),
                padding_positions: padding_positions.to_vec(),
                anticipation: anticipation.to_vec(),
                game_type,
            })
            .await?;
        self.emitter
            .broadcast(EmitterEvent::SoundScatterCounterClear);
        Ok(())
    }

    async fn on_win_info(&self, wins: &[book_events::WinInfoItem]) -> Result<(), EmitterError> {
        self.emitter.broadcast(EmitterEvent::SoundOnce {
            name: "sfx_winlevel_small",
        });
        for win in wins {
            self.animate_symbols(&win.positions).await?;
        }
        Ok(())
    }

    async fn on_set_win(&self, amount: u64, win_level: u32) -> Result<(), EmitterError> {
        let win_level = win_level_data(win_level);

        self.emitter.broadcast(EmitterEvent::WinShow);
        self.win_level_sounds_play(win_level).await?;
        self.emitter
            .broadcast_async(EmitterEvent::WinUpdate { amount, win_level })
            .await?;
        self.win_level_sounds_stop().await?;
        self.emitter.broadcast(EmitterEvent::WinHide);
        Ok(())
    }

    async fn on_set_total_win(&self, amount: u64) -> Result<(), EmitterError> {
        self.state.write().await.win_book_event_amount = amount;
        Ok(())
    }

    async fn on_free_spin_trigger(
        &self,
        total_fs: u32,
        positions: &[Position],
    ) -> Result<(), EmitterError> {
        self.emitter.broadcast(EmitterEvent::SoundOnce {
            name: "sfx_scatter_win_v2",
        });
        self.animate_symbols(positions).await?;
        self.emitter.broadcast(EmitterEvent::SoundOnce {
            name: "sfx_superfreespin",
        });
        self.emitter.broadcast_async(EmitterEvent::UiHide).await?;
        self.emitter.broadcast_async(EmitterEvent::Transition).await?;
        self.emitter.broadcast(EmitterEvent::FreeSpinIntroShow);
        self.emitter.broadcast(EmitterEvent::SoundOnce {
            name: "jng_intro_fs",
        });
        self.emitter.broadcast(EmitterEvent::SoundMusic {
            name: "bgm_freespin",
        });
        self.emitter
            .broadcast_async(EmitterEvent::FreeSpinIntroUpdate {
                total_free_spins: total_fs,
            })
            .await?;

        {
            let mut state = self.state.write().await;
            state.game_type = GameType::Freegame;
            state.free_spin_counter_show = true;
            state.free_spin_current = 0;
            state.free_spin_total = total_fs;
        }

        self.emitter.broadcast(EmitterEvent::FreeSpinIntroHide);
        self.emitter.broadcast(EmitterEvent::BoardFrameGlowShow);
        self.emitter.broadcast(EmitterEvent::FreeSpinCounterShow);
        self.emitter.broadcast(EmitterEvent::FreeSpinCounterUpdate {
            current: 0,
            total: total_fs,
        });
        self.emitter.broadcast_async(EmitterEvent::UiShow).await?;
        self.emitter
            .broadcast_async(EmitterEvent::DrawerButtonShow)
            .await?;
        self.emitter.broadcast(EmitterEvent::DrawerFold);
        Ok(())
    }

    async fn on_update_free_spin(&self, amount: u32, total: u32) -> Result<(), EmitterError> {
        // Guards against an off-by-one server payload exceeding the
        // advertised total. Saturating so an absurd amount still clamps
        // instead of overflowing.
        let current = amount.saturating_add(1).min(total);

        self.emitter.broadcast(EmitterEvent::FreeSpinCounterShow);
        {
            let mut state = self.state.write().await;
            state.free_spin_counter_show = true;
            state.free_spin_current = current;
            state.free_spin_total = total;
        }
        self.emitter
            .broadcast(EmitterEvent::FreeSpinCounterUpdate { current, total });
        Ok(())
    }

    async fn on_free_spin_retrigger(
        &self,
        total_fs: u32,
        positions: &[Position],
    ) -> Result<(), EmitterError> {
        self.emitter.broadcast(EmitterEvent::SoundOnce {
            name: "sfx_scatter_win_v2",
        });
        self.animate_symbols(positions).await?;
        self.emitter.broadcast(EmitterEvent::FreeSpinCounterShow);
        let current = {
            let mut state = self.state.write().await;
            state.free_spin_counter_show = true;
            state.free_spin_total = total_fs;
            state.free_spin_current
        };
        self.emitter.broadcast(EmitterEvent::FreeSpinCounterUpdate {
            current,
            total: total_fs,
        });
        Ok(())
    }

    async fn on_update_global_mult(
        &self,
        multiplier: Option<f64>,
        value: Option<f64>,
        global_mult: Option<f64>,
        visible: Option<bool>,
        show: Option<bool>,
    ) -> Result<(), EmitterError> {
        // Legacy field spellings in priority order, then the current state,
        // then 1. Zero/NaN coerce to 1 and the result never drops below 1.
        let current = self.state.read().await.global_multiplier;
        let raw = multiplier
            .or(value)
            .or(global_mult)
            .unwrap_or(current);
        let sanitized = if raw.is_finite() && raw != 0.0 { raw } else { 1.0 };
        let next = sanitized.max(1.0);
        let should_show = visible.or(show).unwrap_or(next > 1.0);

        {
            let mut state = self.state.write().await;
            state.global_multiplier = next;
            state.global_multiplier_visible = should_show;
        }

        self.emitter
            .broadcast(EmitterEvent::GlobalMultiplierUpdate { multiplier: next });
        self.emitter.broadcast(if should_show {
            EmitterEvent::GlobalMultiplierShow
        } else {
            EmitterEvent::GlobalMultiplierHide
        });
        Ok(())
    }

    async fn on_free_spin_end(&self, amount: u64, win_level: u32) -> Result<(), EmitterError> {
        let win_level = win_level_data(win_level);

        self.emitter.broadcast_async(EmitterEvent::UiHide).await?;
        {
            let mut state = self.state.write().await;
            state.game_type = GameType::Basegame;
        }
        self.emitter.broadcast(EmitterEvent::BoardFrameGlowHide);
        self.emitter.broadcast(EmitterEvent::FreeSpinOutroShow);
        self.emitter.broadcast(EmitterEvent::SoundOnce {
            name: "sfx_youwon_panel",
        });
        self.win_level_sounds_play(win_level).await?;
        self.emitter
            .broadcast_async(EmitterEvent::FreeSpinOutroCountUp { amount, win_level })
            .await?;
        self.win_level_sounds_stop().await?;
        self.emitter.broadcast(EmitterEvent::FreeSpinOutroHide);
        self.emitter.broadcast(EmitterEvent::FreeSpinCounterHide);

        {
            let mut state = self.state.write().await;
            state.free_spin_counter_show = false;
            state.global_multiplier = 1.0;
            state.global_multiplier_visible = false;
        }
        self.emitter
            .broadcast(EmitterEvent::GlobalMultiplierUpdate { multiplier: 1.0 });
        self.emitter.broadcast(EmitterEvent::GlobalMultiplierHide);

        self.emitter.broadcast_async(EmitterEvent::Transition).await?;
        self.emitter.broadcast_async(EmitterEvent::UiShow).await?;
        self.emitter
            .broadcast_async(EmitterEvent::DrawerUnfold)
            .await?;
        self.emitter.broadcast(EmitterEvent::DrawerButtonHide);
        Ok(())
    }

    /// Restores UI state on mid-bonus resume by replaying the most recent
    /// occurrence of each restorable event type, in fixed priority order.
    /// Event types not present in the snapshot are skipped, not defaulted.
    async fn on_create_bonus_snapshot(
        &self,
        book_events: &[BookEvent],
    ) -> Result<(), EmitterError> {
        for tag in [
            "freeSpinTrigger",
            "updateFreeSpin",
            "setTotalWin",
            "updateGlobalMult",
        ] {
            let last = book_events
                .iter()
                .rev()
                .find(|event| event.event_type() == tag);
            if let Some(event) = last {
                self.replay(event, book_events).await?;
            }
        }
        Ok(())
    }

    /// Boxed re-entry into `handle` for snapshot replay (async recursion).
    fn replay<'a>(
        &'a self,
        event: &'a BookEvent,
        book_events: &'a [BookEvent],
    ) -> BoxFuture<'a, Result<(), EmitterError>> {
        Box::pin(self.handle(event, BookEventContext { book_events }))
    }

    async fn animate_symbols(&self, positions: &[Position]) -> Result<(), EmitterError> {
        self.emitter.broadcast(EmitterEvent::BoardShow);
        self.emitter
            .broadcast_async(EmitterEvent::BoardWithAnimateSymbols {
                symbol_positions: positions.to_vec(),
            })
            .await
    }

    async fn win_level_sounds_play(
        &self,
        win_level: Option<WinLevelData>,
    ) -> Result<(), EmitterError> {
        let Some(data) = win_level else {
            return Ok(());
        };
        if data.kind == WinLevelKind::Max {
            self.emitter.broadcast_async(EmitterEvent::UiHide).await?;
        }
        if let Some(sfx) = data.sfx {
            self.emitter.broadcast(EmitterEvent::SoundOnce { name: sfx });
        }
        if let Some(bgm) = data.bgm {
            self.emitter.broadcast(EmitterEvent::SoundMusic { name: bgm });
        }
        if matches!(data.kind, WinLevelKind::Big | WinLevelKind::Max) {
            self.emitter.broadcast(EmitterEvent::SoundLoop {
                name: "sfx_bigwin_coinloop",
            });
        }
        Ok(())
    }

    async fn win_level_sounds_stop(&self) -> Result<(), EmitterError> {
        self.emitter.broadcast(EmitterEvent::SoundStop {
            name: "sfx_bigwin_coinloop",
        });
        let bgm = if self.state.read().await.game_type == GameType::Freegame {
            "bgm_freespin"
        } else {
            "bgm_main"
        };
        self.emitter.broadcast(EmitterEvent::SoundMusic { name: bgm });
        self.emitter.broadcast_async(EmitterEvent::UiShow).await
    }
}
