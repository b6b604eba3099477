use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serves a feed of random synthetic locations as JSON")]
pub struct Cli {
    /// Address to listen on.
    #[clap(long, env = "LOCATION_FEED_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on, 0 picks a free one.
    #[clap(long, env = "LOCATION_FEED_PORT", default_value = "8080")]
    pub port: u16,

    /// Path the feed is served at.
    #[clap(long, env = "LOCATION_FEED_PATH", default_value = "/")]
    pub path: String,

    /// Number of HTTP workers, defaults to one per CPU.
    #[clap(long, env = "LOCATION_FEED_WORKERS")]
    pub workers: Option<usize>,

    /// Also write rotating log files under `<dir>/logs/`.
    #[clap(long, env = "LOCATION_FEED_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "LOCATION_FEED_LOG_LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level `{s}`, expected off/error/warn/info/debug/trace"))
}
