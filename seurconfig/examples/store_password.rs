//! Enregistre un mot de passe SEUR chiffré dans config.yaml
//!
//! Usage:
//!   cargo run -p seurconfig --example store_password -- cit "mot_de_passe"
//!   cargo run -p seurconfig --example store_password -- ws "mot_de_passe"
//!   cargo run -p seurconfig --example store_password -- show

use anyhow::{bail, Result};
use seurconfig::encryption::{encrypt_password, get_password, is_encrypted};
use seurconfig::get_config;
use serde_yaml::Value;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = get_config();

    match args.get(1).map(String::as_str) {
        Some(service @ ("cit" | "ws")) => {
            let Some(password) = args.get(2) else {
                print_usage();
                bail!("Missing password");
            };

            let section = if service == "cit" {
                "credentials"
            } else {
                "ws_credentials"
            };
            let encrypted = encrypt_password(password)?;
            config.set_value(
                &["seur", section, "password"],
                Value::String(encrypted.clone()),
            )?;

            println!("Stored seur.{}.password in {}", section, config.directory());
            println!("  {}", encrypted);
        }

        Some("show") => {
            for section in ["credentials", "ws_credentials"] {
                let stored = config.get_string(&["seur", section, "password"])?;
                let state = if stored.is_empty() {
                    "not set"
                } else if is_encrypted(&stored) {
                    match get_password(&stored) {
                        Ok(_) => "encrypted, readable on this machine",
                        Err(_) => "encrypted on another machine",
                    }
                } else {
                    "plaintext"
                };
                println!("seur.{}.password: {}", section, state);
            }
        }

        _ => print_usage(),
    }

    Ok(())
}

fn print_usage() {
    println!("Usage:");
    println!("  cargo run -p seurconfig --example store_password -- cit <password>");
    println!("  cargo run -p seurconfig --example store_password -- ws <password>");
    println!("  cargo run -p seurconfig --example store_password -- show");
}
