//! Recogidas (ws.seur.com)
//!
//! Ces opérations utilisent les identifiants ws.seur.com définis avec
//! [`SeurApi::set_ws_login`], distincts de ceux de cit.seur.com.

use super::SeurApi;
use crate::endpoints::Service;
use crate::error::Result;
use crate::fields::{Data, PICKUP_FIELDS, resolve, tagged};
use crate::soap::{
    SoapArg, build_document, find_first, last_text, parse_inner_document, wrapped_text,
};
use crate::transport::Transport;
use tracing::{debug, info, warn};

const OP_CREATE: &str = "crearRecogida";
const OP_CANCEL: &str = "anularRecogida";

/// Fragment commun aux messages de succès (`Éxito`, `éxito`...)
const SUCCESS_MARKER: &str = "xito";

/// Résultat d'une demande de recogida
///
/// `None` signifie que la valeur n'était pas présente dans la réponse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickupResult {
    /// Localizador (dernier `LOCALIZADOR`)
    pub pickup_ref: Option<String>,
    /// Numéro de recogida (dernier `NUM_RECOGIDA`)
    pub pickup_num: Option<String>,
    /// Tasación (dernier `TASACION`)
    pub amount: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
}

/// Résultat d'une annulation de recogida
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelResult {
    /// Message renvoyé par SEUR
    pub message: String,
    /// Le même message quand l'annulation a échoué
    pub error: Option<String>,
}

impl<T: Transport> SeurApi<T> {
    /// Demande une recogida
    ///
    /// # Errors
    ///
    /// [`SeurError::MissingWsCredentials`](crate::SeurError::MissingWsCredentials)
    /// avant tout appel si les identifiants ws.seur.com manquent.
    pub fn pickup_service(&self, data: &Data) -> Result<PickupResult> {
        let credentials = self.ws_credentials()?;

        let mut fields = vec![
            ("usuario", credentials.username.clone()),
            ("password", credentials.password.clone()),
        ];
        fields.extend(tagged(resolve(&[PICKUP_FIELDS], data)));
        let document = build_document(&["recogida"], fields)?;

        let root = self.call(Service::Pickup, OP_CREATE, vec![SoapArg::document(document)])?;
        let out = wrapped_text(&root, "out", Some("ns1:out"))?;
        let reply = parse_inner_document(&out)?;

        let mut result = PickupResult::default();
        if find_first(&reply, "RECOGIDA").is_some() {
            result.pickup_ref = last_text(&reply, "LOCALIZADOR");
            result.pickup_num = last_text(&reply, "NUM_RECOGIDA");
            result.amount = last_text(&reply, "TASACION");
            info!(
                pickup_num = ?result.pickup_num,
                pickup_ref = ?result.pickup_ref,
                "Pickup scheduled"
            );
        }
        if find_first(&reply, "ERROR").is_some() {
            result.error_code = last_text(&reply, "CODIGO");
            result.error_description = last_text(&reply, "DESCRIPCION");
            warn!(
                code = ?result.error_code,
                "Pickup rejected: {}",
                result.error_description.as_deref().unwrap_or_default()
            );
        }

        Ok(result)
    }

    /// Annule une recogida
    ///
    /// SEUR renvoie le même élément en cas de succès ou d'échec : seul le
    /// texte permet de les distinguer.
    pub fn cancel_pickup(&self, pickup_num: &str, pickup_ref: &str) -> Result<CancelResult> {
        let credentials = self.ws_credentials()?;

        let document = build_document(
            &["recogida"],
            vec![
                ("usuario", credentials.username.clone()),
                ("password", credentials.password.clone()),
                ("codRecogida", pickup_num.to_string()),
                ("localizador", pickup_ref.to_string()),
            ],
        )?;

        let root = self.call(Service::Pickup, OP_CANCEL, vec![SoapArg::document(document)])?;
        let message = wrapped_text(&root, "ns1:out", None)?;
        debug!(pickup_num = pickup_num, "Cancel reply: {}", message);

        let error = if message.contains(SUCCESS_MARKER) {
            None
        } else {
            warn!(pickup_num = pickup_num, "Pickup cancellation failed: {}", message);
            Some(message.clone())
        };

        Ok(CancelResult { message, error })
    }
}
