//! Transport HTTP des requêtes SOAP

use crate::error::{Result, SeurError};
use crate::soap::parse_soap_fault;
use tracing::{debug, warn};
use ureq::Agent;

/// Envoi d'un document XML et lecture de la réponse brute
///
/// [`UreqTransport`] est l'implémentation réelle ; les tests utilisent des
/// transports qui enregistrent les requêtes.
pub trait Transport {
    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>>;
}

/// Transport HTTP bloquant basé sur `ureq`
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Les statuts 4xx/5xx ne sont pas des erreurs ureq : le corps d'un
        // HTTP 500 contient le SOAP Fault qu'on veut remonter.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>> {
        debug!(url = %url, bytes = body.len(), "POST SOAP request");

        let mut response = self
            .agent
            .post(url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .send(body)?;

        let status = response.status();
        let bytes = response.body_mut().read_to_vec()?;
        debug!(url = %url, status = %status, bytes = bytes.len(), "SOAP response");

        if !status.is_success() {
            if let Some(fault) = parse_soap_fault(&bytes) {
                warn!(url = %url, code = %fault.fault_code, "SOAP fault: {}", fault.fault_string);
                return Err(SeurError::SoapFault {
                    code: fault.fault_code,
                    message: fault.fault_string,
                });
            }
            return Err(SeurError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>> {
        (**self).post(url, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>> {
        (**self).post(url, body)
    }
}
