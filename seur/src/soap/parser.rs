//! Extraction des valeurs des réponses SEUR
//!
//! Les recherches se font par nom qualifié (`prefix:name`), dans tout le
//! document et dans l'ordre du document, racine comprise : `out` ne
//! correspond donc pas à `<ns1:out>`.

use crate::error::{Result, SeurError};
use indexmap::IndexMap;
use std::borrow::Cow;
use xmltree::{Element, XMLNode};

/// Parse une réponse brute
pub fn parse_document(xml: &[u8]) -> Result<Element> {
    Ok(Element::parse(xml)?)
}

/// Parse un document transmis sous forme de texte dans une réponse
///
/// Le texte est déjà décodé : une éventuelle déclaration XML (souvent
/// `encoding="ISO-8859-1"`) est ignorée.
pub fn parse_inner_document(text: &str) -> Result<Element> {
    let trimmed = text.trim_start();
    let body = trimmed
        .strip_prefix("<?xml")
        .and_then(|rest| rest.split_once("?>"))
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);

    Ok(Element::parse(body.as_bytes())?)
}

/// Nom qualifié d'un élément (`ns1:out`, `mensaje`...)
pub fn qualified_name(element: &Element) -> Cow<'_, str> {
    match &element.prefix {
        Some(prefix) => Cow::Owned(format!("{}:{}", prefix, element.name)),
        None => Cow::Borrowed(element.name.as_str()),
    }
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(XMLNode::as_element)
}

/// Tous les éléments portant ce nom, dans l'ordre du document
pub fn find_all<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    fn collect<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
        if qualified_name(element) == name {
            found.push(element);
        }
        for child in child_elements(element) {
            collect(child, name, found);
        }
    }

    let mut found = Vec::new();
    collect(root, name, &mut found);
    found
}

/// Premier élément portant ce nom
pub fn find_first<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    if qualified_name(root) == name {
        return Some(root);
    }
    child_elements(root).find_map(|child| find_first(child, name))
}

/// Texte direct d'un élément (nœuds texte et CDATA concaténés)
pub fn text_of(element: &Element) -> String {
    element
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Text(text) | XMLNode::CData(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Texte du premier élément portant ce nom
pub fn first_text(root: &Element, name: &str) -> Option<String> {
    find_first(root, name).map(text_of)
}

/// Texte du dernier élément portant ce nom
///
/// Quand une réponse répète un élément, c'est la dernière occurrence qui
/// fait foi.
pub fn last_text(root: &Element, name: &str) -> Option<String> {
    find_all(root, name)
        .into_iter()
        .fold(None, |_, element| Some(text_of(element)))
}

/// Texte du premier enfant d'un élément
///
/// `<ECB><string>123</string></ECB>` donne `123`. Sans enfant élément, le
/// texte direct est utilisé.
pub fn first_child_text(element: &Element) -> String {
    match child_elements(element).next() {
        Some(child) => text_of(child),
        None => text_of(element),
    }
}

/// Texte de l'élément enveloppe d'une réponse
///
/// Cherche `name`, puis `alias` s'il est fourni. Échoue avec
/// [`SeurError::MissingElement`] si aucun des deux n'est présent.
pub fn wrapped_text(root: &Element, name: &str, alias: Option<&str>) -> Result<String> {
    find_first(root, name)
        .or_else(|| alias.and_then(|alias| find_first(root, alias)))
        .map(text_of)
        .ok_or_else(|| SeurError::missing_element(alias.unwrap_or(name)))
}

/// Aplatit une liste `<REGISTROS><REG1>...</REG1><REG2>...</REG2></REGISTROS>`
///
/// Le nombre d'enregistrements est le nombre d'enfants de `REGISTROS` ;
/// chaque `REGn` devient une table `nom de l'enfant -> texte`, dans l'ordre
/// du document. Sans `REGISTROS`, la liste est vide.
pub fn flatten_registros(root: &Element) -> Vec<IndexMap<String, String>> {
    let Some(registros) = find_first(root, "REGISTROS") else {
        return Vec::new();
    };

    let total = child_elements(registros).count();
    (1..=total)
        .filter_map(|n| find_first(registros, &format!("REG{}", n)))
        .map(|reg| {
            child_elements(reg)
                .map(|field| (qualified_name(field).into_owned(), text_of(field)))
                .collect()
        })
        .collect()
}
