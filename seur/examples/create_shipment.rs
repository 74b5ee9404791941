//! Crée une expédition et enregistre l'étiquette PDF
//!
//! L'étiquette est écrite dans le répertoire `seur.labels.directory` de la
//! configuration. Le mode PDF est forcé pour cet exemple.
//!
//! Usage:
//! ```bash
//! cargo run -p seur --example create_shipment -- "Ana Lopez" 08001 "Gran Via 1" BARCELONA
//! ```

use anyhow::bail;
use seur::{Data, Options, SeurApi, decode_pdf_label};
use seurconfig::get_config;
use std::path::Path;
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

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [nombre, cpostal, direccion, poblacion] = args.as_slice() else {
        bail!("Usage: create_shipment <nombre> <cpostal> <direccion> <poblacion>");
    };

    let api = SeurApi::from_config(&config)?.with_options(Options {
        pdf: true,
        ..Default::default()
    });

    let mut data = Data::new();
    data.insert("cliente_nombre".into(), nombre.clone());
    data.insert("cliente_cpostal".into(), cpostal.clone());
    data.insert("cliente_direccion".into(), direccion.clone());
    data.insert("cliente_poblacion".into(), poblacion.clone());
    data.insert("cliente_pais".into(), "ES".into());

    let result = api.create(&data)?;
    if let Some(error) = result.error {
        bail!("SEUR a refusé l'expédition : {}", error);
    }

    let reference = result.reference.unwrap_or_else(|| "sans_reference".to_string());
    println!("Expédition créée : {}", reference);

    match result.label {
        Some(label) => {
            let path = Path::new(&config.get_label_dir()?).join(format!("{}.pdf", reference));
            std::fs::write(&path, decode_pdf_label(&label)?)?;
            println!("Étiquette : {}", path.display());
        }
        None => println!("Aucune étiquette dans la réponse"),
    }

    Ok(())
}
