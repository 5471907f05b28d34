//! Fixed two-slot player table and state broadcasting.
//!
//! The table replaces an unbounded id sequence with two canonical slots:
//! paddle 1 and paddle 2. A connection claims the lowest free slot, a freed
//! slot becomes claimable again, and anything beyond two live players is
//! refused at accept time. Each occupied slot owns the sending end of the
//! connection's outbound line channel; the receiving end is drained by a
//! writer task that owns the TCP write half.

use log::{debug, info};
use std::net::SocketAddr;
use tokio::sync::mpsc;

/// One occupied player slot: the outbound handle for its connection.
#[derive(Debug)]
pub struct PlayerHandle {
    pub addr: SocketAddr,
    sender: mpsc::UnboundedSender<String>,
}

/// Registry of the two canonical player slots, shared between the accept
/// loop, the per-connection read tasks and the simulation loop. Every
/// claim/release happens under a single write-lock acquisition.
#[derive(Debug, Default)]
pub struct PlayerTable {
    slots: [Option<PlayerHandle>; 2],
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the lowest free slot for a new connection. Returns the slot
    /// id (1 or 2), or `None` when both paddles already have players.
    pub fn claim(&mut self, addr: SocketAddr, sender: mpsc::UnboundedSender<String>) -> Option<u8> {
        let index = self.slots.iter().position(|slot| slot.is_none())?;
        self.slots[index] = Some(PlayerHandle { addr, sender });

        let slot = index as u8 + 1;
        info!("Player {} connected from {}", slot, addr);
        Some(slot)
    }

    /// Frees a slot on disconnect. Dropping the handle closes the outbound
    /// channel, which ends the writer task and closes the stream's write
    /// half exactly once. Returns false if the slot was already free.
    pub fn release(&mut self, slot: u8) -> bool {
        match self.slots.get_mut(slot as usize - 1).and_then(Option::take) {
            Some(handle) => {
                info!("Player {} ({}) disconnected", slot, handle.addr);
                true
            }
            None => false,
        }
    }

    /// Number of occupied slots. The simulation runs iff this is 2.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.active_count() == self.slots.len()
    }

    /// Queues one formatted line to every occupied slot. A closed channel
    /// (peer torn down mid-broadcast) is skipped; it never affects delivery
    /// to the other slot and never surfaces to the caller.
    pub fn broadcast(&self, line: &str) {
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(handle) = slot {
                if handle.sender.send(line.to_string()).is_err() {
                    debug!("Dropping broadcast to player {}: channel closed", index + 1);
                }
            }
        }
    }
}
