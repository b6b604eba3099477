use std::{fs, path::Path};

use anyhow::{Context, Result};
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    {ContentLimit, FileRotate},
};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

/// Installs the global logger: always the terminal, plus a rotating file at
/// `<log_dir>/logs/feed.log` when a directory is given.
pub fn init(log_dir: Option<&Path>, level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(log_dir) = log_dir {
        let folder = log_dir.join("logs");
        fs::create_dir_all(&folder)
            .with_context(|| format!("failed to create log folder {}", folder.display()))?;
        let log = FileRotate::new(
            folder.join("feed.log"),
            AppendTimestamp::default(FileLimit::MaxFiles(3)),
            ContentLimit::Lines(1000),
            Compression::None,
            #[cfg(unix)]
            None,
        );
        loggers.push(WriteLogger::new(level, config, log));
    }

    CombinedLogger::init(loggers).context("a logger is already installed")?;
    Ok(())
}
