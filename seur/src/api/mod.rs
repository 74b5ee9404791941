//! Accès aux services web SEUR
//!
//! [`SeurApi`] porte les identifiants, le compte et les options d'impression.
//! Les opérations sont réparties par famille de services :
//!
//! - [`picking`] : expéditions, étiquettes, consultations et manifiesto
//! - [`pickup`] : création et annulation de recogidas
//! - [`catalog`] : recherche de villes et de codes postaux

pub mod catalog;
pub mod picking;
pub mod pickup;

use crate::endpoints::Service;
use crate::error::{Result, SeurError};
use crate::soap::{SoapArg, build_document, build_soap_request, first_text, parse_document};
use crate::transport::{Transport, UreqTransport};
use std::fmt;
use tracing::debug;
use xmltree::Element;

/// Message retourné par [`SeurApi::test_connection`] quand `mensaje` manque
const MISSING_MESSAGE: &str = "Not found message attribute from test_connection XML";

/// Identifiants d'un service SEUR
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Vrai si le nom d'utilisateur et le mot de passe sont renseignés
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Identifiants du compte client SEUR
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// NIF de l'entreprise
    pub vat: String,
    /// Code de franquicia
    pub franchise: String,
    pub seurid: String,
    /// Code client (CI)
    pub ci: String,
    /// Code de compte client (CCC)
    pub ccc: String,
}

/// Options d'impression des étiquettes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Étiquette PDF (base64) au lieu d'une trace imprimante
    pub pdf: bool,
    pub printer: String,
    pub printer_model: String,
    pub ecb_code: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pdf: false,
            printer: "ZEBRA".to_string(),
            printer_model: "LP2844-Z".to_string(),
            ecb_code: "2C".to_string(),
        }
    }
}

/// Client des services web SEUR
///
/// Le client est synchrone : chaque opération fait un unique POST et
/// attend la réponse.
///
/// # Exemple
///
/// ```rust,no_run
/// use seur::{Account, Credentials, SeurApi};
///
/// let api = SeurApi::new(
///     Credentials::new("user", "secret"),
///     Account {
///         vat: "B00000000".into(),
///         franchise: "08".into(),
///         seurid: "1".into(),
///         ci: "12345".into(),
///         ccc: "54321".into(),
///     },
/// )
/// .test_mode(true);
///
/// println!("{}", api.test_connection()?);
/// # Ok::<(), seur::SeurError>(())
/// ```
pub struct SeurApi<T: Transport = UreqTransport> {
    /// Identifiants cit.seur.com (étiquettes)
    credentials: Credentials,
    /// Identifiants ws.seur.com (recogidas)
    ws_credentials: Option<Credentials>,
    account: Account,
    /// Serveurs de pré-production
    is_test: bool,
    options: Options,
    transport: T,
}

impl SeurApi<UreqTransport> {
    /// Crée un client utilisant le transport HTTP par défaut
    pub fn new(credentials: Credentials, account: Account) -> Self {
        Self::with_transport(credentials, account, UreqTransport::new())
    }
}

impl<T: Transport> SeurApi<T> {
    /// Crée un client avec un transport spécifique
    pub fn with_transport(credentials: Credentials, account: Account, transport: T) -> Self {
        Self {
            credentials,
            ws_credentials: None,
            account,
            is_test: false,
            options: Options::default(),
            transport,
        }
    }

    /// Sélectionne les serveurs de pré-production
    pub fn test_mode(mut self, is_test: bool) -> Self {
        self.is_test = is_test;
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_ws_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.set_ws_login(username, password);
        self
    }

    /// Définit les identifiants ws.seur.com, nécessaires aux recogidas
    ///
    /// Ce ne sont pas ceux de cit.seur.com passés à la construction.
    pub fn set_ws_login(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.ws_credentials = Some(Credentials::new(username, password));
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_test(&self) -> bool {
        self.is_test
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Envoie un document XML à un service et retourne la réponse brute
    pub fn connect(&self, url: &str, xml: &str) -> Result<Vec<u8>> {
        self.transport.post(url, xml)
    }

    /// Identifiants ws.seur.com, en erreur s'ils manquent
    pub(crate) fn ws_credentials(&self) -> Result<&Credentials> {
        self.ws_credentials
            .as_ref()
            .filter(|credentials| credentials.is_complete())
            .ok_or(SeurError::MissingWsCredentials)
    }

    /// Appelle une opération et parse l'enveloppe de réponse
    pub(crate) fn call(
        &self,
        service: Service,
        operation: &str,
        args: Vec<SoapArg>,
    ) -> Result<Element> {
        let url = service.url(self.is_test);
        let (prefix, namespace) = service.namespace();
        debug!(url = %url, operation = operation, "Calling SEUR service");

        let xml = build_soap_request(prefix, namespace, operation, args)?;
        let response = self.connect(url, &xml)?;
        parse_document(&response)
    }

    /// Vérifie les identifiants cit.seur.com
    ///
    /// Envoie une expédition vide : SEUR la rejette avec `mensaje` à `ERROR`
    /// quand l'authentification a réussi. Tout autre message est renvoyé
    /// tel quel.
    pub fn test_connection(&self) -> Result<String> {
        let empty = build_document(&["ROOT", "EXP", "BULTO"], Vec::new())?;
        let args = vec![
            SoapArg::text(self.credentials.username.as_str()),
            SoapArg::text(self.credentials.password.as_str()),
            SoapArg::document(empty),
            SoapArg::text(picking::LABEL_FILENAME),
            SoapArg::text(self.account.vat.as_str()),
            SoapArg::text(self.account.franchise.as_str()),
            SoapArg::text("-1"),
            SoapArg::text(self.account.seurid.as_str()),
        ];

        let root = self.call(Service::Label, picking::OP_LABEL_TEXT, args)?;

        Ok(match first_text(&root, "mensaje") {
            Some(message) if message == "ERROR" => "Connection successfully".to_string(),
            Some(message) => message,
            None => MISSING_MESSAGE.to_string(),
        })
    }
}
