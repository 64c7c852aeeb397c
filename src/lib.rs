// src/lib.rs

#[macro_use]
pub mod macros;

pub mod log;

pub mod aggregate;
pub mod cli;
pub mod discover;
pub mod error;
pub mod export;
pub mod net;
pub mod params;
pub mod progress;
pub mod runner;
pub mod table;
pub mod trades;

pub use error::ScrapeError;
pub use table::Table;
