//! Headless slot client entry point.
//!
//! Authenticates, places one bet, decodes the returned round and plays its
//! book through the emitter with a logging renderer attached, then closes
//! the round.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use book_player::{new_shared_state, BookPlayer};
use event_emitter::BroadcastEmitter;
use rgs_client::{QueryParams, RgsRequests};

mod config;
mod logging;
mod renderer;

use config::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(&args)?;

    info!("starting slot client v{}", env!("CARGO_PKG_VERSION"));

    let params = QueryParams::parse(&args.query);
    let requests = RgsRequests::new(params);
    if requests.should_use_debug() {
        info!("no live session configured, using the debug synthesizer");
    }

    let auth = requests
        .authenticate()
        .await
        .context("authentication failed")?;
    info!(
        balance = auth.balance.amount,
        currency = %auth.balance.currency,
        "authenticated"
    );

    let bet = requests.bet(Some(args.amount)).await.context("bet failed")?;
    info!(
        amount = bet.round.amount,
        mode = %bet.round.mode,
        events = bet.round.state.len(),
        "round received"
    );

    let events = book_events::decode_events(bet.round.state);

    let emitter = Arc::new(BroadcastEmitter::new());
    renderer::attach_headless_renderer(&emitter);

    let state = new_shared_state();
    let player = BookPlayer::new(emitter, state.clone());
    player.play(&events).await.context("book playback failed")?;

    requests.end_round().await.context("end-round failed")?;

    let state = state.read().await;
    info!(
        total_win = state.win_book_event_amount,
        global_multiplier = state.global_multiplier,
        "round complete"
    );
    Ok(())
}
