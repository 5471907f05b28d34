//! # Pong State-Sync Server Library
//!
//! Authoritative server for a two-player networked pong session. The server
//! owns the canonical game state, accepts exactly two players over TCP,
//! applies their paddle commands, advances the ball physics on a fixed
//! tick and broadcasts one state line per tick so both clients render
//! identical positions. Clients never compute their own collision or score
//! truth; they conform to the broadcast.
//!
//! ## Architecture
//!
//! One tokio task per concern:
//! - an accept loop that claims one of the two canonical player slots per
//!   connection, performs the one-line id handshake and refuses anything
//!   beyond two live players,
//! - one read task per connection, parsing newline-terminated paddle
//!   commands and forwarding own-slot writes to the simulation,
//! - one writer task per connection, exclusively owning the stream's write
//!   half and draining that slot's outbound line channel,
//! - the simulation loop, sole owner of the game state, which idles below
//!   two players and otherwise ticks at a fixed rate: apply pending paddle
//!   writes, integrate, bounce, score, clamp, broadcast.
//!
//! Because every state mutation funnels through the simulation task's
//! command channel, no lock guards the game state itself and no broadcast
//! can observe a partially applied tick. The player table is the only
//! shared structure and sits behind an `RwLock`.
//!
//! ## Module Organization
//!
//! - [`game`] — the game state record and per-tick physics/scoring.
//! - [`players`] — the fixed two-slot player table and the broadcaster.
//! - [`network`] — TCP listener, handshake, per-connection tasks.
//! - [`simulation`] — the Idle/Running loop tying the above together.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::game::GameState;
//! use server::network::Listener;
//! use server::players::PlayerTable;
//! use server::simulation::{self, GameCommand};
//! use std::sync::Arc;
//! use tokio::sync::{mpsc, RwLock};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let players = Arc::new(RwLock::new(PlayerTable::new()));
//!     let (cmd_tx, cmd_rx) = mpsc::channel::<GameCommand>(1000);
//!
//!     let listener = Listener::bind("127.0.0.1:5555", Arc::clone(&players), cmd_tx).await?;
//!     tokio::spawn(async move { listener.run().await });
//!
//!     simulation::run(GameState::new(), players, cmd_rx, 60).await;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod network;
pub mod players;
pub mod simulation;
