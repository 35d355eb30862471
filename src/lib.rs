pub mod analyzer;
pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
pub mod models;
pub mod normalizer;
pub mod oracle;
pub mod pipeline;
pub mod router;
pub mod runner;
pub mod scanner;
pub mod utils;
