use event_emitter::EmitterError;

/// Round-halting playback failure.
///
/// Once a handler fails, the round is considered corrupted: the sequencer
/// stops and the failure propagates to the host, which decides recovery
/// (retry round, show error). Partial-failure continuation across events is
/// deliberately not offered.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("book event {index} ({event_type}) failed: {source}")]
    EventFailed {
        index: usize,
        event_type: &'static str,
        #[source]
        source: EmitterError,
    },
}
