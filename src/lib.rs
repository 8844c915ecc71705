pub mod catalog;
pub mod commands;
pub mod config;
pub mod observability;

pub use config::Config;
