pub mod check;
pub mod commands;
pub mod scan;
pub mod validate;

pub use commands::{Cli, Commands};
