//! Boundary decode: loose external event data in, strict tagged union out.
//!
//! External sources (live RGS responses, debug sample mutation) are not
//! trusted to be well-formed. Unknown types and malformed payloads must not
//! abort an in-progress round, so this step degrades per event and reports
//! anomalies on the warning channel instead of failing.

use serde_json::Value;
use tracing::warn;

use crate::book::BookEvent;

/// Decodes a raw event list into the typed model.
///
/// - Unknown `type` tags decode to [`BookEvent::Unknown`] (played as no-ops).
/// - Events that fail to decode entirely are dropped with a warning.
/// - Raw `index` fields, when present, are checked for strictly increasing
///   order; violations are warned about but playback order stays list order.
pub fn decode_events(raw: Vec<Value>) -> Vec<BookEvent> {
    let mut events = Vec::with_capacity(raw.len());
    let mut last_index: Option<i64> = None;

    for (position, value) in raw.into_iter().enumerate() {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("<missing>")
            .to_string();

        if let Some(index) = value.get("index").and_then(Value::as_i64) {
            if last_index.is_some_and(|prev| index <= prev) {
                warn!(position, index, "book event index is not strictly increasing");
            }
            last_index = Some(index);
        }

        match serde_json::from_value::<BookEvent>(value) {
            Ok(BookEvent::Unknown) => {
                warn!(event_type = %tag, position, "unknown book event type, playing as no-op");
                events.push(BookEvent::Unknown);
            }
            Ok(event) => events.push(event),
            Err(e) => {
                warn!(event_type = %tag, position, error = %e, "malformed book event, dropping");
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_typed_events_and_keeps_unknowns() {
        let raw = vec![
            json!({ "index": 0, "type": "reveal", "board": [], "gameType": "basegame" }),
            json!({ "index": 1, "type": "madeUpEvent", "payload": true }),
            json!({ "index": 2, "type": "setTotalWin", "amount": 500_000 }),
        ];
        let events = decode_events(raw);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event_type(), "reveal");
        assert_eq!(events[1], BookEvent::Unknown);
        assert_eq!(events[2], BookEvent::SetTotalWin { amount: 500_000 });
    }

    #[test]
    fn drops_events_that_cannot_decode() {
        let raw = vec![
            json!({ "type": "setTotalWin", "amount": "not-a-number" }),
            json!({ "type": "finalWin" }),
        ];
        let events = decode_events(raw);
        assert_eq!(events, vec![BookEvent::FinalWin]);
    }

    #[test]
    fn missing_type_field_is_dropped_not_fatal() {
        let raw = vec![json!({ "amount": 1 }), json!({ "type": "finalWin" })];
        let events = decode_events(raw);
        assert_eq!(events, vec![BookEvent::FinalWin]);
    }
}
