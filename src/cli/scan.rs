use std::path::Path;

use tracing::info;

use super::commands::ScanArgs;
use crate::config::load_config;
use crate::errors::ProvexError;
use crate::scanner::ReachabilityScanner;

pub async fn handle_scan(args: ScanArgs) -> Result<(), ProvexError> {
    let config = load_config(args.config.as_deref().map(Path::new)).await?;

    let scanner = ReachabilityScanner::new(config.scan);
    let graph = scanner.scan(&args.cidr).await?;

    let json = serde_json::to_string_pretty(&graph)?;
    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &json).await?;
            info!(path = %path, hosts = graph.host_count(), "Exposure graph written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
