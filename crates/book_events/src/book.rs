//! The book event tagged union and round envelope types.

use serde::{Deserialize, Serialize};

use crate::board::{Board, GameType, Position};

/// A single symbol-combination win inside a `winInfo` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinInfoItem {
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// One server-authored outcome event.
///
/// Payload fields default when absent so a malformed event degrades instead
/// of aborting an in-progress round; `Unknown` absorbs event types this
/// client does not recognize (forward compatibility; old clients must not
/// crash on new server events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BookEvent {
    Reveal {
        #[serde(default)]
        board: Board,
        #[serde(default)]
        padding_positions: Vec<i64>,
        #[serde(default)]
        game_type: GameType,
        #[serde(default)]
        anticipation: Vec<u32>,
    },
    WinInfo {
        #[serde(default)]
        wins: Vec<WinInfoItem>,
    },
    SetWin {
        #[serde(default)]
        amount: u64,
        #[serde(default)]
        win_level: u32,
    },
    SetTotalWin {
        #[serde(default)]
        amount: u64,
    },
    FreeSpinTrigger {
        #[serde(default)]
        total_fs: u32,
        #[serde(default)]
        positions: Vec<Position>,
    },
    FreeSpinRetrigger {
        #[serde(default)]
        total_fs: u32,
        #[serde(default)]
        positions: Vec<Position>,
    },
    UpdateFreeSpin {
        #[serde(default)]
        amount: u32,
        #[serde(default)]
        total: u32,
    },
    /// Carries the same semantic value under several legacy field names,
    /// resolved in priority order by the handler map.
    UpdateGlobalMult {
        #[serde(default)]
        multiplier: Option<f64>,
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        global_mult: Option<f64>,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        show: Option<bool>,
    },
    FreeSpinEnd {
        #[serde(default)]
        amount: u64,
        #[serde(default)]
        win_level: u32,
    },
    /// Terminal marker: the server sends this to indicate the book is done.
    FinalWin,
    /// Replay-composition event referencing prior events of the same stream,
    /// used to restore UI state when a session resumes mid-bonus.
    CreateBonusSnapshot {
        #[serde(default)]
        book_events: Vec<BookEvent>,
    },
    /// Any event type this client does not recognize. Handled as a no-op.
    #[serde(other)]
    Unknown,
}

impl BookEvent {
    /// Wire tag of this event, for logging and backward scans.
    pub fn event_type(&self) -> &'static str {
        match self {
            BookEvent::Reveal { .. } => "reveal",
            BookEvent::WinInfo { .. } => "winInfo",
            BookEvent::SetWin { .. } => "setWin",
            BookEvent::SetTotalWin { .. } => "setTotalWin",
            BookEvent::FreeSpinTrigger { .. } => "freeSpinTrigger",
            BookEvent::FreeSpinRetrigger { .. } => "freeSpinRetrigger",
            BookEvent::UpdateFreeSpin { .. } => "updateFreeSpin",
            BookEvent::UpdateGlobalMult { .. } => "updateGlobalMult",
            BookEvent::FreeSpinEnd { .. } => "freeSpinEnd",
            BookEvent::FinalWin => "finalWin",
            BookEvent::CreateBonusSnapshot { .. } => "createBonusSnapshot",
            BookEvent::Unknown => "unknown",
        }
    }
}

/// The round as delivered by the RGS or the debug synthesizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub events: Vec<BookEvent>,
}

/// Inbound event stream shape: `{ round: { id?, events } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundEnvelope {
    pub round: Round,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_event_round_trips_through_tagged_json() {
        let raw = json!({
            "type": "freeSpinTrigger",
            "totalFs": 8,
            "positions": [{ "reel": 0, "row": 1 }, { "reel": 2, "row": 0 }],
        });
        let event: BookEvent = serde_json::from_value(raw).unwrap();
        match &event {
            BookEvent::FreeSpinTrigger { total_fs, positions } => {
                assert_eq!(*total_fs, 8);
                assert_eq!(positions.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(event.event_type(), "freeSpinTrigger");
    }

    #[test]
    fn unknown_event_type_decodes_to_unknown() {
        let raw = json!({ "type": "madeUpEvent", "whatever": 42 });
        let event: BookEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event, BookEvent::Unknown);
    }

    #[test]
    fn missing_payload_fields_default() {
        let raw = json!({ "type": "updateGlobalMult" });
        let event: BookEvent = serde_json::from_value(raw).unwrap();
        match event {
            BookEvent::UpdateGlobalMult {
                multiplier,
                value,
                global_mult,
                visible,
                show,
            } => {
                assert!(multiplier.is_none());
                assert!(value.is_none());
                assert!(global_mult.is_none());
                assert!(visible.is_none());
                assert!(show.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
