pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod geocode;
pub mod source;
pub mod store;
