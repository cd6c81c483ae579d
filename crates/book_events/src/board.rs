//! Board, symbol and position types shared by book and emitter events.

use serde::{Deserialize, Serialize};

/// Symbol name that triggers bonus logic when enough land on the board.
pub const SCATTER: &str = "S";

/// Which game phase a spin belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    #[default]
    Basegame,
    Freegame,
}

/// One cell of the reveal board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolCell {
    pub name: String,
    /// Per-symbol multiplier, present on wild/multiplier symbols only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl SymbolCell {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiplier: None,
        }
    }

    pub fn scatter() -> Self {
        Self::named(SCATTER)
    }

    pub fn is_scatter(&self) -> bool {
        self.name == SCATTER
    }
}

/// One column per reel, a fixed number of rows per column.
pub type Board = Vec<Vec<SymbolCell>>;

/// A board coordinate referenced by win and trigger events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub reel: usize,
    pub row: usize,
}

impl Position {
    pub fn new(reel: usize, row: usize) -> Self {
        Self { reel, row }
    }
}
