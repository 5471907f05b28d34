use clap::Parser;
use log::{error, info};
use server::game::GameState;
use server::network::Listener;
use server::players::PlayerTable;
use server::simulation::{self, GameCommand};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Main-method of the application.
/// Parses command-line arguments, then spawns the connection listener and
/// the simulation loop and waits for either to end (or Ctrl+C).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, default_value = "5555")]
        port: u16,
        /// Tick rate (updates per second)
        #[clap(short, long, default_value = "60")]
        tick_rate: u32,
    }

    env_logger::init();
    let args = Args::parse();

    // Two canonical player slots, shared between the network and simulation tasks
    let players = Arc::new(RwLock::new(PlayerTable::new()));

    // Bounded channel carrying paddle writes into the simulation
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameCommand>(1000);

    let address = format!("{}:{}", args.host, args.port);
    let listener = Listener::bind(&address, Arc::clone(&players), cmd_tx).await?;

    // Spawn connection listener task
    let listener_handle = tokio::spawn(async move {
        if let Err(e) = listener.run().await {
            error!("Listener failed: {}", e);
        }
    });

    // Spawn simulation task
    let simulation_handle = {
        let players = Arc::clone(&players);
        let tick_rate = args.tick_rate;
        tokio::spawn(async move {
            simulation::run(GameState::new(), players, cmd_rx, tick_rate).await;
        })
    };

    // Handle shutdown gracefully
    tokio::select! {
        result = listener_handle => {
            if let Err(e) = result {
                error!("Listener task panicked: {}", e);
            }
        }
        result = simulation_handle => {
            if let Err(e) = result {
                error!("Simulation task panicked: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
