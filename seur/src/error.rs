//! Gestion des erreurs pour le client SEUR
//!
//! Seules les erreurs de configuration, de transport et de format sont
//! remontées ici. Les erreurs métier renvoyées par SEUR (`mensaje` différent
//! de `OK`, élément `ERROR` d'une recogida...) font partie du résultat
//! normal de chaque opération.

use thiserror::Error;

/// Type Result personnalisé pour seur
pub type Result<T> = std::result::Result<T, SeurError>;

/// Erreurs possibles lors d'un appel aux services SEUR
#[derive(Error, Debug)]
pub enum SeurError {
    /// Identifiants ws.seur.com absents (recogidas)
    #[error(
        "You have not set the username and password for ws.seur.com \
         and are necessary for a pickup service"
    )]
    MissingWsCredentials,

    /// Erreur de transport (DNS, TLS, connexion...)
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    /// Erreur d'entrée/sortie
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Réponse HTTP non 2xx sans SOAP Fault exploitable
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// SOAP Fault renvoyé par le service
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    /// Réponse XML mal formée
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// Impossible de sérialiser la requête
    #[error("XML render error: {0}")]
    Render(#[from] xmltree::Error),

    /// Élément obligatoire absent de la réponse
    #[error("Missing {0} element in SOAP response")]
    MissingElement(String),

    /// Contenu PDF invalide
    #[error("Invalid PDF label: {0}")]
    InvalidLabel(String),

    /// Erreur de configuration (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl SeurError {
    pub fn missing_element(name: &str) -> Self {
        SeurError::MissingElement(name.to_string())
    }
}
