//! The authoritative simulation loop.
//!
//! A two-state machine keyed off the live player count: **Idle** while
//! fewer than two slots are occupied (no mutation, no broadcast, 100 ms
//! poll), **Running** while both paddles have players. Each running tick
//! drains the command channel, applies paddle writes, advances the physics
//! and broadcasts the settled snapshot. The loop is the sole owner of the
//! [`GameState`], so paddle writes and physics never interleave mid-update.

use crate::game::GameState;
use crate::players::PlayerTable;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};

/// How long the Idle state waits before re-checking the player count.
/// Bounds CPU usage while waiting for a pair, not precision.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// A state mutation requested by a connection's read task, serialized
/// through the simulation's command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    SetPaddle { slot: u8, y: i32 },
}

/// Drives the simulation for the life of the process. `tick_rate` is the
/// Running-state update frequency in Hz; missed ticks are skipped rather
/// than bursted.
pub async fn run(
    mut state: GameState,
    players: Arc<RwLock<PlayerTable>>,
    mut cmd_rx: mpsc::Receiver<GameCommand>,
    tick_rate: u32,
) {
    let mut rng = StdRng::from_entropy();
    let mut ticker = interval(Duration::from_secs_f32(1.0 / tick_rate as f32));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!("Simulation loop started at {} Hz", tick_rate);

    loop {
        let active = players.read().await.active_count();
        if active < 2 {
            sleep(IDLE_POLL).await;
            // Discard writes queued while idle: a lone player's stream must
            // not back up the bounded channel, and a released slot's stale
            // writes must never reach the slot's next occupant.
            while cmd_rx.try_recv().is_ok() {}
            ticker.reset();
            continue;
        }

        ticker.tick().await;

        // A player may have left during the tick wait; with a preemptive
        // runtime the count has to be re-checked before touching the state.
        if players.read().await.active_count() < 2 {
            continue;
        }

        // Apply all pending paddle writes before the physics step so the
        // broadcast below always reflects a fully settled tick.
        while let Ok(cmd) = cmd_rx.try_recv() {
            apply_command(&mut state, cmd);
        }

        state.tick(&mut rng);

        let line = state.snapshot().to_line();
        players.read().await.broadcast(&line);
    }
}

fn apply_command(state: &mut GameState, cmd: GameCommand) {
    match cmd {
        GameCommand::SetPaddle { slot, y } => state.set_paddle(slot, y),
    }
}
