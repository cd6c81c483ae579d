//! RGS request layer and debug round synthesizer.
//!
//! Talks to the remote game server when a session is configured, and
//! fabricates structurally identical responses from bundled sample books
//! when it is not. The rest of the client cannot tell the two apart.

pub mod debug;
pub mod error;
pub mod params;
pub mod requests;
pub mod samples;

pub use debug::{debug_play, force_scatter, Scenario};
pub use error::RgsError;
pub use params::QueryParams;
pub use requests::{
    AuthenticateResponse, BetResponse, BetRound, RgsRequests, API_AMOUNT_MULTIPLIER,
    DEFAULT_BET_LEVELS,
};
pub use samples::DebugBook;
