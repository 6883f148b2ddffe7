use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use aula::catalog;
use aula::clock::SystemClock;
use aula::manager::BookingManager;
use aula::shell::{ConsolePresenter, Shell, ShellOutcome};
use aula::store::FileStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::var("AULA_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let seed: Option<u64> = std::env::var("AULA_SEED")
        .ok()
        .and_then(|s| s.parse().ok());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let rooms = catalog::generate_rooms(&mut rng);

    let storage = FileStorage::open(&data_dir)?;
    let manager = BookingManager::new(rooms, storage, SystemClock, ConsolePresenter);
    let mut shell = Shell::new(manager);

    info!("aula ready");
    info!("  data_dir: {data_dir}");
    info!("  rooms: {}", catalog::ROOM_COUNT);
    info!("  seed: {}", seed.map_or("os".into(), |s| s.to_string()));
    println!("Type 'help' for commands.");

    // Graceful shutdown on SIGTERM/ctrl-c, same as closing the page.
    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("failed to register SIGTERM handler");
            tokio::select! {
                _ = ctrl_c => {}
                _ = sigterm.recv() => {}
            }
        }
        #[cfg(not(unix))]
        {
            ctrl_c.await.ok();
        }
    };
    tokio::pin!(shutdown);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if shell.handle_line(&line) == ShellOutcome::Quit {
                            break;
                        }
                    }
                    None => {
                        info!("stdin closed");
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!("aula stopped");
    Ok(())
}
