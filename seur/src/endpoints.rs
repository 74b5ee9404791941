//! Points d'accès des services SEUR
//!
//! Chaque famille de services a un hôte de production et, pour certaines,
//! un hôte de pré-production (`citpre`, `wspre`).

/// Famille de services SEUR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Étiquettes et expéditions (cit.seur.com)
    Label,
    /// Manifiesto PDF (cit.seur.com)
    Manifest,
    /// Création / annulation de recogidas (ws.seur.com)
    Pickup,
    /// Consultation d'expéditions (ws.seur.com)
    Query,
    /// Catalogue public des villes et codes postaux (ws.seur.com)
    Catalog,
}

impl Service {
    /// URL du service, en production ou en pré-production
    ///
    /// Les services de consultation et de catalogue n'ont pas d'hôte de
    /// pré-production : la production est toujours utilisée.
    pub fn url(self, is_test: bool) -> &'static str {
        match (self, is_test) {
            (Service::Label, false) => {
                "https://cit.seur.com/CIT-war/services/ImprimirECBWebService"
            }
            (Service::Label, true) => {
                "https://citpre.seur.com/CIT-war/services/ImprimirECBWebService"
            }
            (Service::Manifest, false) => {
                "https://cit.seur.com/CIT-war/services/DetalleBultoPDFWebService"
            }
            (Service::Manifest, true) => {
                "https://citpre.seur.com/CIT-war/services/DetalleBultoPDFWebService"
            }
            (Service::Pickup, false) => "https://ws.seur.com/webseur/services/WSCrearRecogida",
            (Service::Pickup, true) => "https://wspre.seur.com/webseur/services/WSCrearRecogida",
            (Service::Query, _) => "https://ws.seur.com/webseur/services/WSConsultaExpediciones",
            (Service::Catalog, _) => {
                "https://ws.seur.com/WSEcatalogoPublicos/servlet/XFireServlet/WSServiciosWebPublicos"
            }
        }
    }

    /// Préfixe et URI du namespace des opérations du service
    pub fn namespace(self) -> (&'static str, &'static str) {
        match self {
            Service::Label => ("imp", "http://localhost:7026/ImprimirECBWebService"),
            Service::Manifest => ("det", "http://localhost:7026/DetalleBultoPDFWebService"),
            Service::Pickup => ("rec", "http://crearRecogida.servicios.webseur"),
            Service::Query => ("con", "http://consultaExpediciones.servicios.webseur"),
            Service::Catalog => ("pub", "http://servicios.webseur"),
        }
    }
}
