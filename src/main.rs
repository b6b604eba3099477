use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use location_feed::cli::Cli;
use location_feed::{logs, FeedServer};
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logs::init(cli.log_dir.as_deref(), cli.log_level)?;

    let mut server = FeedServer::new(&cli.host, cli.port).with_path(&cli.path);
    if let Some(workers) = cli.workers {
        server = server.with_workers(workers);
    }
    server.start()?;
    info!("Serving location feed at {}", server.url());

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .context("failed to install Ctrl+C handler")?;

    // Block the main thread until Ctrl+C
    rx.recv().context("Ctrl+C handler dropped")?;
    info!("Ctrl+C pressed. Stopping server...");
    server.stop();
    Ok(())
}
