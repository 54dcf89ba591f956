pub mod color;
pub mod config;
pub mod generate;
pub mod icon;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
