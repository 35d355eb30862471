pub mod text;

pub use text::{strip_code_fences, truncate_chars};
