//! Catalogue public : villes et codes postaux

use super::SeurApi;
use crate::endpoints::Service;
use crate::error::Result;
use crate::soap::{SoapArg, flatten_registros, parse_inner_document, wrapped_text};
use crate::transport::Transport;
use indexmap::IndexMap;
use tracing::debug;

const OP_CITY: &str = "infoPoblacionesCortoStr";
const OP_ZIP: &str = "infoCodigoPostalStr";

/// Un enregistrement du catalogue (`NOM_POBLACION`, `CODIGO_POSTAL`...)
///
/// Les champs sont dans l'ordre de la réponse.
pub type CatalogEntry = IndexMap<String, String>;

impl<T: Transport> SeurApi<T> {
    /// Recherche les localités correspondant à un nom (mis en majuscules)
    pub fn city(&self, city: &str) -> Result<Vec<CatalogEntry>> {
        self.lookup(OP_CITY, city.to_uppercase())
    }

    /// Recherche les localités d'un code postal
    pub fn zip(&self, zip: &str) -> Result<Vec<CatalogEntry>> {
        self.lookup(OP_ZIP, zip.to_string())
    }

    fn lookup(&self, operation: &str, value: String) -> Result<Vec<CatalogEntry>> {
        let args = vec![
            SoapArg::Text(value),
            SoapArg::text(self.credentials.username.as_str()),
            SoapArg::text(self.credentials.password.as_str()),
        ];

        let root = self.call(Service::Catalog, operation, args)?;
        let out = wrapped_text(&root, "ns1:out", None)?;
        let entries = flatten_registros(&parse_inner_document(&out)?);
        debug!(operation = operation, count = entries.len(), "Catalog lookup");

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{test_api, wrapped_response};

    const CITIES: &str = "<REGISTROS>\
        <REG1><NOM_POBLACION>BARCELONA</NOM_POBLACION><CODIGO_POSTAL>08001</CODIGO_POSTAL></REG1>\
        <REG2><NOM_POBLACION>BARCELONETA</NOM_POBLACION><CODIGO_POSTAL>08003</CODIGO_POSTAL></REG2>\
        <REG3><NOM_POBLACION>BARCELONA</NOM_POBLACION><CODIGO_POSTAL>08080</CODIGO_POSTAL></REG3>\
        </REGISTROS>";

    #[test]
    fn test_city_entries_in_order() {
        let api = test_api(&wrapped_response("ns1:out", CITIES));
        let entries = api.city("barcelona").unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["CODIGO_POSTAL"], "08001");
        assert_eq!(entries[1]["NOM_POBLACION"], "BARCELONETA");
        assert_eq!(entries[2]["CODIGO_POSTAL"], "08080");

        let request = api.transport().last_request();
        assert_eq!(
            request.url,
            "https://ws.seur.com/WSEcatalogoPublicos/servlet/XFireServlet/WSServiciosWebPublicos"
        );
        assert!(request.body.contains("<pub:infoPoblacionesCortoStr>"));
        assert!(request.body.contains("<pub:in0>BARCELONA</pub:in0>"));
    }

    #[test]
    fn test_zip_keeps_value() {
        let api = test_api(&wrapped_response("ns1:out", CITIES)).test_mode(true);
        api.zip("08001").unwrap();

        let request = api.transport().last_request();
        assert!(request.url.starts_with("https://ws.seur.com/"));
        assert!(request.body.contains("<pub:infoCodigoPostalStr>"));
        assert!(request.body.contains("<pub:in0>08001</pub:in0>"));
    }

    #[test]
    fn test_lookup_without_registros() {
        let api = test_api(&wrapped_response("ns1:out", "<SIN_DATOS/>"));
        assert!(api.zip("99999").unwrap().is_empty());
    }
}
