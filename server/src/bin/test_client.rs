//! Minimal TCP test client for exercising the server protocol by hand.
//!
//! Connects, prints the handshake, then sweeps its own paddle up and down
//! while printing every broadcast the server sends.

use shared::{StateUpdate, GAME_OVER, PADDLE_HEIGHT, WORLD_HEIGHT};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:5555".to_string());

    let stream = TcpStream::connect(&addr).await?;
    println!("Connected to {}", addr);

    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    let handshake = lines
        .next_line()
        .await?
        .ok_or("server closed before handshake")?;

    if handshake.trim() == GAME_OVER {
        println!("Server refused the connection: both player slots are taken");
        return Ok(());
    }

    let slot: u8 = handshake.trim().parse()?;
    println!("Assigned player slot {}", slot);

    // Sweep our paddle so the server has something to echo back
    let sweeper = tokio::spawn(async move {
        let max_y = (WORLD_HEIGHT - PADDLE_HEIGHT) as i32;
        let mut y = max_y / 2;
        let mut step = 6;

        loop {
            y += step;
            if y < 0 || y > max_y {
                step = -step;
                y += step;
            }

            let line = format!("PADDLE{}_Y:{}\n", slot, y);
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            sleep(Duration::from_millis(16)).await;
        }
    });

    while let Some(line) = lines.next_line().await? {
        match StateUpdate::parse_line(&line) {
            Some(state) => println!(
                "ball=({:.1}, {:.1}) vel=({:.1}, {:.1}) paddles=({}, {}) score {}-{}",
                state.ball_x,
                state.ball_y,
                state.ball_vel_x,
                state.ball_vel_y,
                state.paddle1_y,
                state.paddle2_y,
                state.score1,
                state.score2,
            ),
            None => println!("<< {}", line),
        }
    }

    sweeper.abort();
    println!("Server closed the connection");
    Ok(())
}
