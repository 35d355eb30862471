use std::path::Path;

use super::commands::CheckArgs;
use crate::config::load_config;
use crate::errors::ProvexError;

pub async fn handle_check(args: CheckArgs) -> Result<(), ProvexError> {
    let _config = load_config(Some(Path::new(&args.config))).await?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
