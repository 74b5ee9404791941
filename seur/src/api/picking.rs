//! Expéditions : création, étiquettes, consultations et manifiesto

use super::SeurApi;
use crate::endpoints::Service;
use crate::error::Result;
use crate::fields::{
    Data, Field, INFO_FIELDS, LABEL_FIELDS, LIST_FIELDS, SHIPMENT_FIELDS, resolve, tagged,
};
use crate::soap::{
    SoapArg, build_document, find_first, first_child_text, first_text, text_of, wrapped_text,
};
use crate::transport::Transport;
use chrono::Local;
use tracing::{debug, warn};
use xmltree::Element;

pub(crate) const OP_LABEL_TEXT: &str = "impresionIntegracionConECBWS";
pub(crate) const OP_LABEL_PDF: &str = "impresionIntegracionPDFConECBWS";
pub(crate) const LABEL_FILENAME: &str = "fichero_expedicion.xml";

const OP_INFO: &str = "consultaExpedicionesStr";
const OP_LIST: &str = "consultaListadoExpedicionesStr";
const OP_MANIFEST: &str = "impresionManifiestoPDF";

/// Résultat d'une création d'expédition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateResult {
    /// Code ECB de l'expédition
    pub reference: Option<String>,
    /// PDF en base64 ou trace imprimante, selon [`Options::pdf`](super::Options)
    pub label: Option<String>,
    /// Message d'erreur de SEUR (`mensaje` différent de `OK`)
    pub error: Option<String>,
}

impl CreateResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl<T: Transport> SeurApi<T> {
    /// Crée une expédition et récupère son étiquette
    ///
    /// Les clés absentes de `data` prennent leur valeur par défaut
    /// (voir [`crate::fields::LABEL_FIELDS`] et
    /// [`crate::fields::SHIPMENT_FIELDS`]).
    pub fn create(&self, data: &Data) -> Result<CreateResult> {
        let root = self.print_label(&[LABEL_FIELDS, SHIPMENT_FIELDS], data)?;

        if let Some(message) = first_text(&root, "mensaje") {
            if message != "OK" {
                warn!(message = %message, "SEUR rejected the shipment");
                return Ok(CreateResult {
                    error: Some(message),
                    ..Default::default()
                });
            }
        }

        let result = CreateResult {
            reference: find_first(&root, "ECB").map(first_child_text),
            label: self.label_of(&root),
            error: None,
        };
        debug!(reference = ?result.reference, "Shipment created");

        Ok(result)
    }

    /// Récupère l'étiquette d'une expédition
    pub fn label(&self, data: &Data) -> Result<Option<String>> {
        let root = self.print_label(&[LABEL_FIELDS], data)?;
        Ok(self.label_of(&root))
    }

    /// Consulte une expédition
    ///
    /// Retourne le texte brut de `<ns1:out>`.
    pub fn info(&self, data: &Data) -> Result<String> {
        let mut args: Vec<SoapArg> = resolve(&[INFO_FIELDS], data)
            .into_iter()
            .map(|(_, value)| SoapArg::Text(value))
            .collect();
        args.extend(self.credential_args());

        let root = self.call(Service::Query, OP_INFO, args)?;
        wrapped_text(&root, "ns1:out", None)
    }

    /// Liste les expéditions entre `from` et `to` (aujourd'hui par défaut)
    ///
    /// Les dates sont au format `d-m-YYYY`, sans zéro initial.
    pub fn list(&self, data: &Data) -> Result<String> {
        let today = Local::now().format("%-d-%-m-%Y").to_string();
        let date = |key: &str| data.get(key).cloned().unwrap_or_else(|| today.clone());

        let mut values = resolve(&[LIST_FIELDS], data).into_iter().map(|(_, v)| v);
        let mut args = Vec::new();
        // expedicion, from, to, service, public
        args.extend(values.next().map(SoapArg::Text));
        args.push(SoapArg::Text(date("from")));
        args.push(SoapArg::Text(date("to")));
        args.extend(values.map(SoapArg::Text));
        args.push(SoapArg::text(self.account.ccc.as_str()));
        args.extend(self.credential_args());

        let root = self.call(Service::Query, OP_LIST, args)?;
        wrapped_text(&root, "ns1:out", None)
    }

    /// Récupère le manifiesto PDF d'une journée (aujourd'hui par défaut)
    ///
    /// `date` est au format `YYYY-MM-DD`. Retourne `None` si la réponse ne
    /// contient pas de `<ns1:out>`.
    pub fn manifiesto(&self, date: Option<&str>) -> Result<Option<String>> {
        let date = match date.filter(|d| !d.is_empty()) {
            Some(date) => date.to_string(),
            None => Local::now().format("%Y-%m-%d").to_string(),
        };

        let mut args = self.credential_args();
        args.extend(self.account_args());
        args.push(SoapArg::text(self.account.ccc.as_str()));
        args.push(SoapArg::Text(date));

        let root = self.call(Service::Manifest, OP_MANIFEST, args)?;
        Ok(find_first(&root, "ns1:out").map(text_of))
    }

    fn credential_args(&self) -> Vec<SoapArg> {
        vec![
            SoapArg::text(self.credentials.username.as_str()),
            SoapArg::text(self.credentials.password.as_str()),
        ]
    }

    /// vat, franchise, seurid, ci
    fn account_args(&self) -> Vec<SoapArg> {
        [
            &self.account.vat,
            &self.account.franchise,
            &self.account.seurid,
            &self.account.ci,
        ]
        .into_iter()
        .map(|value| SoapArg::text(value.as_str()))
        .collect()
    }

    /// Appel commun à `create` et `label`
    fn print_label(&self, tables: &[&'static [Field]], data: &Data) -> Result<Element> {
        let account = &self.account;
        let mut fields = vec![
            ("ci", account.ci.clone()),
            ("nif", account.vat.clone()),
            ("ccc", account.ccc.clone()),
        ];
        fields.extend(tagged(resolve(tables, data)));
        let document = build_document(&["ROOT", "EXP", "BULTO"], fields)?;

        let mut args = self.credential_args();
        args.push(SoapArg::document(document));
        args.push(SoapArg::text(LABEL_FILENAME));
        args.push(SoapArg::text(account.vat.as_str()));
        args.push(SoapArg::text(account.franchise.as_str()));
        args.push(SoapArg::text("-1"));
        args.push(SoapArg::text(account.seurid.as_str()));

        let operation = if self.options.pdf {
            OP_LABEL_PDF
        } else {
            args.push(SoapArg::text(self.options.printer.as_str()));
            args.push(SoapArg::text(self.options.printer_model.as_str()));
            args.push(SoapArg::text(self.options.ecb_code.as_str()));
            OP_LABEL_TEXT
        };

        self.call(Service::Label, operation, args)
    }

    fn label_of(&self, root: &Element) -> Option<String> {
        let tag = if self.options.pdf { "PDF" } else { "traza" };
        first_text(root, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Options;
    use crate::testing::{soap_response, test_api, wrapped_response};

    const CREATED: &str = "<mensaje>OK</mensaje>\
        <ECB><string>0812345678</string></ECB>\
        <PDF>JVBERi0xLjQ=</PDF>\
        <traza>^XA^FO50,50^FDSEUR^FS^XZ</traza>";

    fn pdf_options() -> Options {
        Options {
            pdf: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_pdf() {
        let api = test_api(&soap_response(CREATED)).with_options(pdf_options());
        let result = api.create(&Data::new()).unwrap();

        assert!(result.is_ok());
        assert_eq!(result.reference.as_deref(), Some("0812345678"));
        assert_eq!(result.label.as_deref(), Some("JVBERi0xLjQ="));

        let body = api.transport().last_request().body;
        assert!(body.contains("<imp:impresionIntegracionPDFConECBWS>"));
        assert!(!body.contains("ZEBRA"));
        assert!(!body.contains("LP2844-Z"));
        assert!(!body.contains("<imp:in8>"));
    }

    #[test]
    fn test_create_text_mode() {
        let api = test_api(&soap_response(CREATED));
        let result = api.create(&Data::new()).unwrap();

        assert_eq!(result.label.as_deref(), Some("^XA^FO50,50^FDSEUR^FS^XZ"));

        let body = api.transport().last_request().body;
        assert!(body.contains("<imp:impresionIntegracionConECBWS>"));
        assert!(body.contains("<imp:in8>ZEBRA</imp:in8>"));
        assert!(body.contains("<imp:in9>LP2844-Z</imp:in9>"));
        assert!(body.contains("<imp:in10>2C</imp:in10>"));
    }

    #[test]
    fn test_create_rejected() {
        let api = test_api(&soap_response(
            "<mensaje>CODIGO POSTAL INCORRECTO</mensaje><ECB><string>1</string></ECB>",
        ));
        let result = api.create(&Data::new()).unwrap();

        assert_eq!(result.error.as_deref(), Some("CODIGO POSTAL INCORRECTO"));
        assert_eq!(result.reference, None);
        assert_eq!(result.label, None);
    }

    #[test]
    fn test_create_empty_message_is_an_error() {
        let api = test_api(&soap_response("<mensaje></mensaje>"));
        let result = api.create(&Data::new()).unwrap();
        assert_eq!(result.error.as_deref(), Some(""));
    }

    #[test]
    fn test_create_sends_account_and_defaults() {
        let api = test_api(&soap_response(CREATED));
        let mut data = Data::new();
        data.insert("cliente_nombre".to_string(), "ACME & Co".to_string());
        api.create(&data).unwrap();

        let request = api.transport().last_request();
        assert_eq!(
            request.url,
            "https://cit.seur.com/CIT-war/services/ImprimirECBWebService"
        );
        let body = request.body;
        assert!(body.contains("<imp:in0>user</imp:in0>"));
        assert!(body.contains("<imp:in1>pass</imp:in1>"));
        assert!(body.contains("<imp:in4>B12345678</imp:in4>"));
        assert!(body.contains("<imp:in6>-1</imp:in6>"));
        assert!(body.contains("<![CDATA[<ROOT><EXP><BULTO><ci>9999</ci><nif>B12345678</nif><ccc>4444</ccc>"));
        assert!(body.contains("<nombre_consignatario>ACME &amp; Co</nombre_consignatario>"));
        assert!(body.contains("<tipoVia_consignatario>CL</tipoVia_consignatario>"));
        assert!(body.contains("<cambio>N</cambio>"));
    }

    #[test]
    fn test_label_skips_shipment_fields() {
        let api = test_api(&soap_response(CREATED)).with_options(pdf_options());
        assert_eq!(api.label(&Data::new()).unwrap().as_deref(), Some("JVBERi0xLjQ="));

        let body = api.transport().last_request().body;
        assert!(body.contains("<nombre_consignatario />") || body.contains("<nombre_consignatario></nombre_consignatario>"));
        assert!(!body.contains("<cambio>"));
        assert!(!body.contains("<test_sms>"));
    }

    #[test]
    fn test_label_text_mode() {
        let api = test_api(&soap_response(CREATED));
        assert_eq!(
            api.label(&Data::new()).unwrap().as_deref(),
            Some("^XA^FO50,50^FDSEUR^FS^XZ")
        );

        let body = api.transport().last_request().body;
        assert!(body.contains("<imp:impresionIntegracionConECBWS>"));
        assert!(body.contains("<imp:in8>ZEBRA</imp:in8>"));
        assert!(body.contains("<imp:in9>LP2844-Z</imp:in9>"));
        assert!(body.contains("<imp:in10>2C</imp:in10>"));
    }

    #[test]
    fn test_label_pdf_mode_omits_printer() {
        let api = test_api(&soap_response(CREATED)).with_options(pdf_options());
        api.label(&Data::new()).unwrap();

        let body = api.transport().last_request().body;
        assert!(body.contains("<imp:impresionIntegracionPDFConECBWS>"));
        assert!(!body.contains("<imp:in8>"));
        assert!(!body.contains("<imp:in9>"));
        assert!(!body.contains("<imp:in10>"));
    }

    #[test]
    fn test_label_missing() {
        let api = test_api(&soap_response("<mensaje>OK</mensaje>"));
        assert_eq!(api.label(&Data::new()).unwrap(), None);
    }

    #[test]
    fn test_info_returns_raw_out() {
        let api = test_api(&wrapped_response("ns1:out", "<EXPEDICION>1</EXPEDICION>"));
        let mut data = Data::new();
        data.insert("reference".to_string(), "REF-1".to_string());

        assert_eq!(api.info(&data).unwrap(), "<EXPEDICION>1</EXPEDICION>");

        let request = api.transport().last_request();
        assert_eq!(
            request.url,
            "https://ws.seur.com/webseur/services/WSConsultaExpediciones"
        );
        assert!(request.body.contains("<con:consultaExpedicionesStr>"));
        assert!(request.body.contains("<con:in0>S</con:in0>"));
        assert!(request.body.contains("<con:in1>REF-1</con:in1>"));
    }

    #[test]
    fn test_info_ignores_test_mode() {
        let api = test_api(&wrapped_response("ns1:out", "x")).test_mode(true);
        api.info(&Data::new()).unwrap();
        assert!(api.transport().last_request().url.starts_with("https://ws.seur.com/"));
    }

    #[test]
    fn test_info_without_out_fails() {
        let api = test_api(&soap_response("<out>x</out>"));
        assert!(api.info(&Data::new()).is_err());
    }

    #[test]
    fn test_list_dates() {
        let api = test_api(&wrapped_response("ns1:out", "<LISTA/>"));
        let mut data = Data::new();
        data.insert("from".to_string(), "1-2-2024".to_string());
        api.list(&data).unwrap();

        let today = Local::now().format("%-d-%-m-%Y").to_string();
        let body = api.transport().last_request().body;
        assert!(body.contains("<con:consultaListadoExpedicionesStr>"));
        assert!(body.contains("<con:in1>1-2-2024</con:in1>"));
        assert!(body.contains(&format!("<con:in2>{}</con:in2>", today)));
        assert!(body.contains("<con:in5>4444</con:in5>"));
    }

    #[test]
    fn test_manifiesto() {
        let api = test_api(&wrapped_response("ns1:out", "JVBERi0=")).test_mode(true);
        assert_eq!(
            api.manifiesto(Some("2024-03-05")).unwrap().as_deref(),
            Some("JVBERi0=")
        );

        let request = api.transport().last_request();
        assert_eq!(
            request.url,
            "https://citpre.seur.com/CIT-war/services/DetalleBultoPDFWebService"
        );
        assert!(request.body.contains(">2024-03-05</det:in7>"));
    }

    #[test]
    fn test_manifiesto_defaults_to_today() {
        let api = test_api(&soap_response("<otro/>"));
        assert_eq!(api.manifiesto(None).unwrap(), None);

        let today = Local::now().format("%Y-%m-%d").to_string();
        assert!(api.transport().last_request().body.contains(&today));
    }
}
