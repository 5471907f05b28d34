//! TCP accept loop and per-connection read/write tasks.
//!
//! Each accepted connection gets a writer task that owns the stream's write
//! half and drains the slot's outbound line channel, plus a read task that
//! parses newline-terminated commands and forwards own-slot paddle writes
//! to the simulation. A connection that arrives while both slots are taken
//! is refused with a single `GAME_OVER` line.

use crate::players::PlayerTable;
use crate::simulation::GameCommand;
use log::{debug, info, warn};
use shared::{Command, GAME_OVER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, RwLock};

/// Owns the listening socket and supervises connection tasks.
pub struct Listener {
    listener: TcpListener,
    players: Arc<RwLock<PlayerTable>>,
    cmd_tx: mpsc::Sender<GameCommand>,
}

impl Listener {
    pub async fn bind(
        addr: &str,
        players: Arc<RwLock<PlayerTable>>,
        cmd_tx: mpsc::Sender<GameCommand>,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            players,
            cmd_tx,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the listening socket fails. Per-connection
    /// failures are handled inside the spawned tasks and never end the loop.
    pub async fn run(self) -> std::io::Result<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            handle_connection(
                stream,
                addr,
                Arc::clone(&self.players),
                self.cmd_tx.clone(),
            )
            .await;
        }
    }
}

/// Claims a slot for a new connection, sends the handshake and starts the
/// read loop — or refuses the connection when the table is full.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    players: Arc<RwLock<PlayerTable>>,
    cmd_tx: mpsc::Sender<GameCommand>,
) {
    let (read_half, write_half) = stream.into_split();
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();
    spawn_writer(write_half, line_rx, addr);

    // The handshake goes out under the same lock as the claim so that no
    // broadcast can be queued ahead of it.
    let slot = {
        let mut table = players.write().await;
        let slot = table.claim(addr, line_tx.clone());
        if let Some(slot) = slot {
            let _ = line_tx.send(format!("{}\n", slot));
        }
        slot
    };

    let Some(slot) = slot else {
        warn!("Refusing connection from {}: both player slots occupied", addr);
        let _ = line_tx.send(format!("{}\n", GAME_OVER));
        // line_tx drops here; the writer flushes the refusal and closes
        return;
    };

    tokio::spawn(async move {
        read_loop(read_half, slot, addr, cmd_tx).await;

        let mut table = players.write().await;
        table.release(slot);
    });
}

/// Reads newline-terminated lines until EOF or a read error. Own-slot
/// paddle commands go to the simulation; everything else is dropped
/// silently, per the protocol contract.
async fn read_loop(
    read_half: OwnedReadHalf,
    slot: u8,
    addr: SocketAddr,
    cmd_tx: mpsc::Sender<GameCommand>,
) {
    let mut lines = BufReader::new(read_half).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match command_for_slot(&line, slot) {
                Some(cmd) => {
                    if cmd_tx.send(cmd).await.is_err() {
                        // Simulation gone; nothing left to drive
                        break;
                    }
                }
                None => debug!("Ignoring line from player {}: {:?}", slot, line),
            },
            Ok(None) => {
                info!("Player {} ({}) closed the connection", slot, addr);
                break;
            }
            Err(e) => {
                warn!("Read error from player {} ({}): {}", slot, addr, e);
                break;
            }
        }
    }
}

/// Parses one inbound line on behalf of a slot. A paddle command is
/// accepted iff it targets the sender's own paddle.
fn command_for_slot(line: &str, slot: u8) -> Option<GameCommand> {
    match Command::parse(line)? {
        Command::PaddleY { slot: target, y } if target == slot => {
            Some(GameCommand::SetPaddle { slot, y })
        }
        Command::PaddleY { .. } => None,
    }
}

/// Spawns the task that owns the write half. It exits when the outbound
/// channel closes (slot released or connection refused) or a write fails;
/// dropping the half closes the stream exactly once.
fn spawn_writer(
    mut write_half: OwnedWriteHalf,
    mut line_rx: mpsc::UnboundedReceiver<String>,
    addr: SocketAddr,
) {
    tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            if let Err(e) = write_half.write_all(line.as_bytes()).await {
                debug!("Write to {} failed: {}", addr, e);
                break;
            }
        }
    });
}
