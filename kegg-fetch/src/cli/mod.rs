pub mod app;
pub mod commands;
pub mod display;

pub use app::{Cli, Commands};
