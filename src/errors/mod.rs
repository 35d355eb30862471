pub mod types;

pub use types::ProvexError;
