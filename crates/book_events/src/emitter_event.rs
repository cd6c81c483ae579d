//! The renderer/audio/UI protocol broadcast through the emitter.
//!
//! Each variant's name and payload shape is a stable contract: the rendering
//! layer is an opaque subscriber that interprets these by name.

use serde::Serialize;

use crate::board::{Board, GameType, Position};
use crate::win_level::WinLevelData;
use event_emitter::BroadcastEvent;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EmitterEvent {
    UiShow,
    UiHide,

    SoundOnce { name: &'static str },
    SoundMusic { name: &'static str },
    SoundLoop { name: &'static str },
    SoundStop { name: &'static str },
    SoundScatterCounterClear,

    BoardShow,
    BoardSpin {
        board: Board,
        padding_positions: Vec<i64>,
        anticipation: Vec<u32>,
        game_type: GameType,
    },
    BoardWithAnimateSymbols { symbol_positions: Vec<Position> },
    BoardFrameGlowShow,
    BoardFrameGlowHide,
    StopButtonEnable,

    FreeSpinIntroShow,
    FreeSpinIntroUpdate { total_free_spins: u32 },
    FreeSpinIntroHide,
    FreeSpinCounterShow,
    FreeSpinCounterUpdate { current: u32, total: u32 },
    FreeSpinCounterHide,
    FreeSpinOutroShow,
    FreeSpinOutroCountUp {
        amount: u64,
        win_level: Option<WinLevelData>,
    },
    FreeSpinOutroHide,

    GlobalMultiplierShow,
    GlobalMultiplierHide,
    GlobalMultiplierUpdate { multiplier: f64 },

    WinShow,
    WinUpdate {
        amount: u64,
        win_level: Option<WinLevelData>,
    },
    WinHide,

    Transition,
    DrawerFold,
    DrawerUnfold,
    DrawerButtonShow,
    DrawerButtonHide,
}

impl EmitterEvent {
    /// Every routing name, in declaration order. Used by hosts that attach a
    /// catch-all renderer (e.g. the headless client).
    pub const NAMES: &'static [&'static str] = &[
        "uiShow",
        "uiHide",
        "soundOnce",
        "soundMusic",
        "soundLoop",
        "soundStop",
        "soundScatterCounterClear",
        "boardShow",
        "boardSpin",
        "boardWithAnimateSymbols",
        "boardFrameGlowShow",
        "boardFrameGlowHide",
        "stopButtonEnable",
        "freeSpinIntroShow",
        "freeSpinIntroUpdate",
        "freeSpinIntroHide",
        "freeSpinCounterShow",
        "freeSpinCounterUpdate",
        "freeSpinCounterHide",
        "freeSpinOutroShow",
        "freeSpinOutroCountUp",
        "freeSpinOutroHide",
        "globalMultiplierShow",
        "globalMultiplierHide",
        "globalMultiplierUpdate",
        "winShow",
        "winUpdate",
        "winHide",
        "transition",
        "drawerFold",
        "drawerUnfold",
        "drawerButtonShow",
        "drawerButtonHide",
    ];
}

impl BroadcastEvent for EmitterEvent {
    fn name(&self) -> &'static str {
        match self {
            EmitterEvent::UiShow => "uiShow",
            EmitterEvent::UiHide => "uiHide",
            EmitterEvent::SoundOnce { .. } => "soundOnce",
            EmitterEvent::SoundMusic { .. } => "soundMusic",
            EmitterEvent::SoundLoop { .. } => "soundLoop",
            EmitterEvent::SoundStop { .. } => "soundStop",
            EmitterEvent::SoundScatterCounterClear => "soundScatterCounterClear",
            EmitterEvent::BoardShow => "boardShow",
            EmitterEvent::BoardSpin { .. } => "boardSpin",
            EmitterEvent::BoardWithAnimateSymbols { .. } => "boardWithAnimateSymbols",
            EmitterEvent::BoardFrameGlowShow => "boardFrameGlowShow",
            EmitterEvent::BoardFrameGlowHide => "boardFrameGlowHide",
            EmitterEvent::StopButtonEnable => "stopButtonEnable",
            EmitterEvent::FreeSpinIntroShow => "freeSpinIntroShow",
            EmitterEvent::FreeSpinIntroUpdate { .. } => "freeSpinIntroUpdate",
            EmitterEvent::FreeSpinIntroHide => "freeSpinIntroHide",
            EmitterEvent::FreeSpinCounterShow => "freeSpinCounterShow",
            EmitterEvent::FreeSpinCounterUpdate { .. } => "freeSpinCounterUpdate",
            EmitterEvent::FreeSpinCounterHide => "freeSpinCounterHide",
            EmitterEvent::FreeSpinOutroShow => "freeSpinOutroShow",
            EmitterEvent::FreeSpinOutroCountUp { .. } => "freeSpinOutroCountUp",
            EmitterEvent::FreeSpinOutroHide => "freeSpinOutroHide",
            EmitterEvent::GlobalMultiplierShow => "globalMultiplierShow",
            EmitterEvent::GlobalMultiplierHide => "globalMultiplierHide",
            EmitterEvent::GlobalMultiplierUpdate { .. } => "globalMultiplierUpdate",
            EmitterEvent::WinShow => "winShow",
            EmitterEvent::WinUpdate { .. } => "winUpdate",
            EmitterEvent::WinHide => "winHide",
            EmitterEvent::Transition => "transition",
            EmitterEvent::DrawerFold => "drawerFold",
            EmitterEvent::DrawerUnfold => "drawerUnfold",
            EmitterEvent::DrawerButtonShow => "drawerButtonShow",
            EmitterEvent::DrawerButtonHide => "drawerButtonHide",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_names_match_serialized_tags() {
        let events = [
            EmitterEvent::UiHide,
            EmitterEvent::SoundOnce { name: "sfx_winlevel_small" },
            EmitterEvent::FreeSpinCounterUpdate { current: 1, total: 8 },
            EmitterEvent::GlobalMultiplierUpdate { multiplier: 2.0 },
            EmitterEvent::Transition,
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["type"], event.name());
            assert!(EmitterEvent::NAMES.contains(&event.name()));
        }
    }
}
