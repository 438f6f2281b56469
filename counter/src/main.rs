//! Mantra counter console binary
//!
//! Reads one command per line from stdin and keeps the count in
//! `MANTRA_DATA_DIR` between runs.

use anyhow::Context;
use mantra_counter::console::{self, ConsoleCommand};
use mantra_counter::{
    ConsoleNotifier, CounterAction, CounterConfig, CounterEnvironment, CounterReducer,
    CounterState, CounterStore, FileStore, SoundEngine,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the counter display
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mantra_counter=info,mantra_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CounterConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        sound = %config.sound_path.display(),
        "Starting mantra counter"
    );

    let storage = FileStore::new(&config.data_dir);
    let sound = SoundEngine::load(&config.sound_path, config.sound_player.as_deref()).await;
    let notifier = ConsoleNotifier::new(sound);
    let env = CounterEnvironment::new(Arc::new(storage), Arc::new(notifier));

    let store: CounterStore<FileStore, ConsoleNotifier> =
        CounterStore::new(CounterState::default(), CounterReducer::new(), env);

    // Input is only accepted once the persisted values are in
    store
        .send(CounterAction::Initialize)
        .await
        .context("failed to start the counter")?
        .wait()
        .await;

    println!("{}", console::HELP);
    println!("{}", store.state(console::render).await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(command) = ConsoleCommand::parse(&line) else {
            println!("Unknown command {:?}, type `help` for the list", line.trim());
            continue;
        };

        match command {
            ConsoleCommand::Quit => break,
            ConsoleCommand::Help => {
                println!("{}", console::HELP);
                continue;
            },
            ConsoleCommand::Close if !store.state(|s| s.target_reached).await => {
                println!("Nothing to close");
                continue;
            },
            _ => {},
        }

        if let Some(action) = command.into_action() {
            store.send(action).await.context("counter stopped")?;
        }

        println!("{}", store.state(console::render).await);
    }

    if let Err(error) = store.shutdown(config.shutdown_timeout()).await {
        tracing::warn!(%error, "Some writes may not have been saved");
    }

    tracing::info!("Goodbye");
    Ok(())
}
