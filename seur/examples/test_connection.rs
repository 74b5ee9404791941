//! Vérifie les identifiants cit.seur.com de la configuration
//!
//! Usage:
//! ```bash
//! RUST_LOG=seur=debug cargo run -p seur --example test_connection
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
        .with_target(false)
        .init();

    let api = SeurApi::from_config(&config)?;

    println!(
        "Serveur : {}",
        if api.is_test() {
            "pré-production"
        } else {
            "production"
        }
    );
    println!("{}", api.test_connection()?);

    Ok(())
}
