//! # seur - Client des services web SEUR
//!
//! Cette crate fournit un client Rust synchrone pour les services SOAP du
//! transporteur SEUR : création d'expéditions et d'étiquettes, recogidas,
//! consultation d'expéditions, manifiestos et catalogue des localités.
//!
//! ## Vue d'ensemble
//!
//! - [`SeurApi`] : identifiants, compte client, mode test et options
//! - `api::picking` : `create`, `label`, `info`, `list`, `manifiesto`
//! - `api::pickup` : `pickup_service`, `cancel_pickup`
//! - `api::catalog` : `city`, `zip`
//! - [`soap`] : construction des enveloppes et lecture des réponses
//! - [`Transport`] : envoi HTTP (par défaut [`UreqTransport`])
//!
//! ## Structure des modules
//!
//! ```text
//! seur/
//! ├── src/
//! │   ├── lib.rs              # Module principal (ce fichier)
//! │   ├── api/
//! │   │   ├── mod.rs          # SeurApi, test_connection
//! │   │   ├── picking.rs      # Expéditions et étiquettes
//! │   │   ├── pickup.rs       # Recogidas
//! │   │   └── catalog.rs      # Villes et codes postaux
//! │   ├── soap/               # Enveloppes SOAP et parsing
//! │   ├── fields.rs           # Tables des champs et valeurs par défaut
//! │   ├── endpoints.rs        # URLs de production / pré-production
//! │   ├── transport.rs        # Transport HTTP
//! │   ├── label.rs            # Décodage des étiquettes PDF
//! │   ├── config_ext.rs       # Intégration seurconfig
//! │   └── error.rs            # Gestion des erreurs
//! ```
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use seur::{Data, SeurApi, decode_pdf_label};
//!
//! fn main() -> anyhow::Result<()> {
//!     let api = SeurApi::from_config(&seurconfig::get_config())?;
//!
//!     let mut data = Data::new();
//!     data.insert("cliente_nombre".into(), "Ana Lopez".into());
//!     data.insert("cliente_cpostal".into(), "08001".into());
//!
//!     let result = api.create(&data)?;
//!     match (result.error, result.label) {
//!         (Some(error), _) => eprintln!("SEUR error: {}", error),
//!         (None, Some(label)) if api.options().pdf => {
//!             std::fs::write("label.pdf", decode_pdf_label(&label)?)?;
//!         }
//!         (None, label) => println!("{:?}", label),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Erreurs
//!
//! Les erreurs de transport, de format et de configuration sont des
//! [`SeurError`]. Les refus de SEUR (message différent de `OK`, élément
//! `ERROR` d'une recogida) sont renvoyés dans les résultats.

pub mod api;
pub mod config_ext;
pub mod endpoints;
pub mod error;
pub mod fields;
pub mod label;
pub mod soap;
pub mod transport;

#[cfg(test)]
mod testing;

pub use api::catalog::CatalogEntry;
pub use api::picking::CreateResult;
pub use api::pickup::{CancelResult, PickupResult};
pub use api::{Account, Credentials, Options, SeurApi};
pub use config_ext::SeurConfigExt;
pub use endpoints::Service;
pub use error::{Result, SeurError};
pub use fields::Data;
pub use label::decode_pdf_label;
pub use transport::{Transport, UreqTransport};
