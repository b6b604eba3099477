#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod cli;
pub mod location_feed;
pub mod logs;
pub mod server;

pub use location_feed::{CoordinateSource, LocationFeed, LocationRecord, ScriptedSource};
pub use server::FeedServer;
