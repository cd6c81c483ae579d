//! Presentation-tier vocabulary for win sizes.
//!
//! The static tier table itself lives with the handler map; these types are
//! shared because the resolved tier travels inside emitter events consumed
//! by the renderer.

use serde::Serialize;

/// Coarse presentation class of a win tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WinLevelKind {
    Small,
    Medium,
    /// Big-class wins run the coin-loop treatment.
    Big,
    /// Maximum win: the UI is hidden for the celebration.
    Max,
}

/// Sound/visual treatment selected for a win level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinLevelData {
    pub alias: &'static str,
    pub kind: WinLevelKind,
    pub sfx: Option<&'static str>,
    pub bgm: Option<&'static str>,
}
