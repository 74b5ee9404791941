//! Construction des requêtes SOAP

use xmltree::{Element, EmitterConfig, XMLNode};

/// Namespace SOAP 1.1
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Argument positionnel d'une opération SEUR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapArg {
    /// Valeur simple, échappée normalement
    Text(String),
    /// Document XML imbriqué, transmis tel quel en CDATA
    Document(String),
}

impl SoapArg {
    pub fn text(value: impl Into<String>) -> Self {
        SoapArg::Text(value.into())
    }

    pub fn document(xml: impl Into<String>) -> Self {
        SoapArg::Document(xml.into())
    }

    fn into_node(self) -> XMLNode {
        match self {
            SoapArg::Text(text) => XMLNode::Text(text),
            SoapArg::Document(xml) => XMLNode::CData(xml),
        }
    }
}

fn write_element(element: &Element, declaration: bool) -> Result<String, xmltree::Error> {
    let mut buf = Vec::new();
    let config = EmitterConfig::new()
        .write_document_declaration(declaration)
        .perform_indent(false);
    element.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn text_element(name: &str, value: impl Into<String>) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(value.into()));
    element
}

/// Construit l'enveloppe SOAP d'une opération SEUR
///
/// # Arguments
///
/// * `prefix` - Préfixe du namespace du service (ex: "imp")
/// * `namespace` - URI du namespace du service
/// * `operation` - Nom de l'opération (ex: "impresionIntegracionConECBWS")
/// * `args` - Arguments dans l'ordre, sérialisés en `in0`, `in1`, ...
pub fn build_soap_request(
    prefix: &str,
    namespace: &str,
    operation: &str,
    args: Vec<SoapArg>,
) -> Result<String, xmltree::Error> {
    let mut operation_elem = Element::new(&format!("{}:{}", prefix, operation));
    for (index, arg) in args.into_iter().enumerate() {
        let mut child = Element::new(&format!("{}:in{}", prefix, index));
        child.children.push(arg.into_node());
        operation_elem.children.push(XMLNode::Element(child));
    }

    let mut body = Element::new("soapenv:Body");
    body.children.push(XMLNode::Element(operation_elem));

    let mut envelope = Element::new("soapenv:Envelope");
    envelope
        .attributes
        .insert("xmlns:soapenv".to_string(), SOAP_ENV_NS.to_string());
    envelope
        .attributes
        .insert(format!("xmlns:{}", prefix), namespace.to_string());
    envelope
        .children
        .push(XMLNode::Element(Element::new("soapenv:Header")));
    envelope.children.push(XMLNode::Element(body));

    write_element(&envelope, true)
}

/// Construit un document imbriqué (sans déclaration XML)
///
/// `path` donne la chaîne d'éléments englobants, de la racine vers la
/// feuille (ex: `&["ROOT", "EXP", "BULTO"]`). Les `fields` deviennent les
/// enfants de la feuille, dans l'ordre.
pub fn build_document<'a, I>(path: &[&str], fields: I) -> Result<String, xmltree::Error>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let Some((leaf_name, parents)) = path.split_last() else {
        return Ok(String::new());
    };

    let mut current = Element::new(leaf_name);
    for (tag, value) in fields {
        current.children.push(XMLNode::Element(text_element(tag, value)));
    }

    for parent_name in parents.iter().rev() {
        let mut parent = Element::new(parent_name);
        parent.children.push(XMLNode::Element(current));
        current = parent;
    }

    write_element(&current, false)
}
