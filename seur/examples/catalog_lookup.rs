//! Recherche dans le catalogue public SEUR
//!
//! Usage:
//! ```bash
//! cargo run -p seur --example catalog_lookup -- city "Sant Cugat"
//! cargo run -p seur --example catalog_lookup -- zip 08001
//! ```

use seur::SeurApi;
use seurconfig::get_config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = get_config();
    // RUST_LOG prime sur logger.min_level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.get_log_min_level()?.to_lowercase())?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let api = SeurApi::from_config(&config)?;

    let entries = match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("city"), Some(city)) => api.city(city)?,
        (Some("zip"), Some(zip)) => api.zip(zip)?,
        _ => {
            println!("Usage: catalog_lookup (city <nombre> | zip <codigo>)");
            return Ok(());
        }
    };

    println!("{} résultat(s)", entries.len());
    for entry in &entries {
        let line: Vec<String> = entry
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        println!("  {}", line.join(" "));
    }

    Ok(())
}
