//! # Module SOAP
//!
//! Construction des enveloppes envoyées aux services SEUR et extraction des
//! valeurs des réponses.
//!
//! ## Conventions SEUR
//!
//! - Les arguments d'une opération s'appellent `in0`, `in1`, ... et sont
//!   préfixés par le namespace du service (`<imp:in0>`).
//! - Plusieurs services attendent un document XML complet dans un argument :
//!   il est transmis en CDATA (voir [`SoapArg::Document`]).
//! - Symétriquement, plusieurs réponses renvoient un document XML sous forme
//!   de texte dans `<ns1:out>` : il faut le parser une seconde fois
//!   ([`parse_inner_document`]).
//!
//! ## Example
//!
//! ```ignore
//! use seur::soap::{SoapArg, build_soap_request, parse_document, wrapped_text};
//!
//! let xml = build_soap_request(
//!     "imp",
//!     "http://localhost:7026/ImprimirECBWebService",
//!     "impresionIntegracionPDFConECBWS",
//!     vec![SoapArg::text("user"), SoapArg::text("secret")],
//! )?;
//!
//! let response = parse_document(b"<out>hola</out>")?;
//! assert_eq!(wrapped_text(&response, "out", Some("ns1:out"))?, "hola");
//! ```

mod builder;
mod fault;
mod parser;

pub use builder::{SOAP_ENV_NS, SoapArg, build_document, build_soap_request};
pub use fault::{SoapFault, parse_soap_fault};
pub use parser::{
    find_all, find_first, first_child_text, first_text, flatten_registros, last_text,
    parse_document, parse_inner_document, qualified_name, text_of, wrapped_text,
};
