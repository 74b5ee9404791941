//! SOAP Faults
//!
//! Les services SEUR répondent en HTTP 500 avec un `Fault` quand la requête
//! est rejetée avant traitement (opération inconnue, document mal formé...).

use super::parser::{find_first, parse_document, text_of};
use xmltree::{Element, XMLNode};

/// Erreur SOAP (Fault)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Code d'erreur (ex: "soap:Server")
    pub fault_code: String,

    /// Description de l'erreur
    pub fault_string: String,
}

fn find_fault(element: &Element) -> Option<&Element> {
    if element.name == "Fault" {
        return Some(element);
    }
    element
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .find_map(find_fault)
}

/// Extrait le Fault d'une réponse, quel que soit le préfixe utilisé
pub fn parse_soap_fault(xml: &[u8]) -> Option<SoapFault> {
    let root = parse_document(xml).ok()?;
    let fault = find_fault(&root)?;

    Some(SoapFault {
        fault_code: find_first(fault, "faultcode")
            .map(text_of)
            .unwrap_or_default(),
        fault_string: find_first(fault, "faultstring")
            .map(text_of)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fault() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Invalid operation name</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

        let fault = parse_soap_fault(xml.as_bytes()).unwrap();
        assert_eq!(fault.fault_code, "soap:Server");
        assert_eq!(fault.fault_string, "Invalid operation name");
    }

    #[test]
    fn test_no_fault() {
        assert!(parse_soap_fault(b"<Envelope><Body><ok/></Body></Envelope>").is_none());
        assert!(parse_soap_fault(b"not xml").is_none());
    }

    #[test]
    fn test_fault_with_other_prefix() {
        let xml = r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
  <env:Body><env:Fault><faultcode>env:Client</faultcode><faultstring>Bad credentials</faultstring></env:Fault></env:Body>
</env:Envelope>"#;

        let fault = parse_soap_fault(xml.as_bytes()).unwrap();
        assert_eq!(fault.fault_code, "env:Client");
        assert_eq!(fault.fault_string, "Bad credentials");
    }
}
