use mockito::{Matcher, Server};
use seur::{Account, Credentials, Data, SeurApi, SeurError, Transport, UreqTransport};

const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

const SERVER_FAULT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Invalid operation name</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

/// Envoie les requêtes au serveur mockito en gardant le chemin du service
struct Redirect {
    base: String,
    inner: UreqTransport,
}

impl Transport for Redirect {
    fn post(&self, url: &str, body: &str) -> seur::Result<Vec<u8>> {
        let path = url
            .split_once("://")
            .and_then(|(_, rest)| rest.find('/').map(|i| &rest[i..]))
            .unwrap_or("/");
        self.inner.post(&format!("{}{}", self.base, path), body)
    }
}

#[test]
fn post_returns_body() -> anyhow::Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/service")
        .match_header("content-type", CONTENT_TYPE)
        .match_body("<ping/>")
        .with_status(200)
        .with_body("<pong/>")
        .create();

    let body = UreqTransport::new().post(&format!("{}/service", server.url()), "<ping/>")?;

    assert_eq!(body, b"<pong/>");
    mock.assert();
    Ok(())
}

#[test]
fn server_fault_is_reported() -> anyhow::Result<()> {
    let mut server = Server::new();
    server
        .mock("POST", "/service")
        .with_status(500)
        .with_header("content-type", CONTENT_TYPE)
        .with_body(SERVER_FAULT)
        .create();

    let err = UreqTransport::new()
        .post(&format!("{}/service", server.url()), "<ping/>")
        .unwrap_err();

    match err {
        SeurError::SoapFault { code, message } => {
            assert_eq!(code, "soap:Server");
            assert_eq!(message, "Invalid operation name");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn http_status_without_fault() {
    let mut server = Server::new();
    server
        .mock("POST", "/missing")
        .with_status(404)
        .with_body("Not Found")
        .create();

    let err = UreqTransport::new()
        .post(&format!("{}/missing", server.url()), "<ping/>")
        .unwrap_err();

    assert!(matches!(
        err,
        SeurError::HttpStatus { status: 404, ref body } if body == "Not Found"
    ));
}

#[test]
fn create_over_http() -> anyhow::Result<()> {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/CIT-war/services/ImprimirECBWebService")
        .match_header("content-type", CONTENT_TYPE)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("impresionIntegracionConECBWS".to_string()),
            Matcher::Regex("<imp:in0>cit_user</imp:in0>".to_string()),
        ]))
        .with_status(200)
        .with_body(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns1:impresionIntegracionConECBWSResponse xmlns:ns1="http://localhost:7026/ImprimirECBWebService">
      <ns1:out>
        <mensaje>OK</mensaje>
        <ECB><string>0812345678</string></ECB>
        <traza>^XA^XZ</traza>
      </ns1:out>
    </ns1:impresionIntegracionConECBWSResponse>
  </soap:Body>
</soap:Envelope>"#,
        )
        .create();

    let transport = Redirect {
        base: server.url(),
        inner: UreqTransport::new(),
    };
    let api = SeurApi::with_transport(
        Credentials::new("cit_user", "cit_pass"),
        Account::default(),
        transport,
    );

    let result = api.create(&Data::new())?;

    assert_eq!(result.error, None);
    assert_eq!(result.reference.as_deref(), Some("0812345678"));
    assert_eq!(result.label.as_deref(), Some("^XA^XZ"));
    mock.assert();
    Ok(())
}
