//! Headless renderer.
//!
//! Subscribes to every emitter event name and logs the payload, with a small
//! sleep standing in for animation time. Lets the whole playback path run
//! without a graphics stack.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use book_events::EmitterEvent;
use event_emitter::BroadcastEmitter;

const FRAME_TIME: Duration = Duration::from_millis(5);

pub fn attach_headless_renderer(emitter: &Arc<BroadcastEmitter<EmitterEvent>>) {
    for &name in EmitterEvent::NAMES {
        emitter.subscribe(name, |event: EmitterEvent| async move {
            match serde_json::to_string(&event) {
                Ok(json) => info!(target: "renderer", "{json}"),
                Err(e) => info!(target: "renderer", "unserializable event: {e}"),
            }
            tokio::time::sleep(FRAME_TIME).await;
            Ok(())
        });
    }
}
