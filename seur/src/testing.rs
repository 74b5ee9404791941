//! Transport factice pour les tests unitaires

use crate::api::{Account, Credentials, SeurApi};
use crate::error::Result;
use crate::transport::Transport;
use std::cell::RefCell;

#[derive(Debug, Clone)]
pub struct Request {
    pub url: String,
    pub body: String,
}

/// Enregistre les requêtes et renvoie toujours la même réponse
pub struct RecordingTransport {
    requests: RefCell<Vec<Request>>,
    response: Vec<u8>,
}

impl RecordingTransport {
    pub fn new(response: &str) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            response: response.as_bytes().to_vec(),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Request {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn post(&self, url: &str, body: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(Request {
            url: url.to_string(),
            body: body.to_string(),
        });
        Ok(self.response.clone())
    }
}

/// Enveloppe SOAP de réponse autour de `body`
pub fn soap_response(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns1:response xmlns:ns1="http://servicios.webseur">
      {}
    </ns1:response>
  </soap:Body>
</soap:Envelope>"#,
        body
    )
}

/// Réponse dont `<ns1:out>` contient `inner` sous forme de texte échappé
pub fn wrapped_response(tag: &str, inner: &str) -> String {
    let escaped = inner
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    soap_response(&format!("<{tag}>{escaped}</{tag}>"))
}

pub fn test_account() -> Account {
    Account {
        vat: "B12345678".to_string(),
        franchise: "08".to_string(),
        seurid: "77".to_string(),
        ci: "9999".to_string(),
        ccc: "4444".to_string(),
    }
}

/// Client de test (identifiants `user` / `pass`) répondant `response`
pub fn test_api(response: &str) -> SeurApi<RecordingTransport> {
    SeurApi::with_transport(
        Credentials::new("user", "pass"),
        test_account(),
        RecordingTransport::new(response),
    )
}
