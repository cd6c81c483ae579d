//! Command-line configuration for the headless client.

use clap::Parser;

/// Plays one round end to end, either against a live RGS or fully offline
/// through the debug synthesizer.
#[derive(Parser, Debug, Clone)]
#[command(name = "slot_client", version, about)]
pub struct Args {
    /// Launch query string, same format a browser client would receive
    /// (e.g. "debug=1&scenario=bonus&bookId=1").
    #[arg(short, long, default_value = "debug=1")]
    pub query: String,

    /// Bet amount in whole currency units.
    #[arg(short, long, default_value_t = 1)]
    pub amount: u64,

    /// Enable debug-level logging.
    #[arg(short, long)]
    pub debug: bool,
}
