//! Tables de champs des requêtes SEUR
//!
//! Chaque opération déclare ses champs : clé acceptée de l'appelant, balise
//! XML envoyée à SEUR et valeur par défaut. [`resolve`] combine ces tables
//! avec les valeurs fournies par l'appelant.

use std::collections::HashMap;

/// Valeurs fournies par l'appelant (`cliente_nombre` -> `ACME SL`)
pub type Data = HashMap<String, String>;

/// Description d'un champ de requête
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Clé lue dans [`Data`]
    pub key: &'static str,
    /// Balise XML envoyée
    pub tag: &'static str,
    /// Valeur utilisée quand la clé est absente
    pub default: &'static str,
}

const fn field(key: &'static str, tag: &'static str, default: &'static str) -> Field {
    Field { key, tag, default }
}

/// Champs d'un bulto, communs à la création d'expédition et à l'étiquette
pub const LABEL_FIELDS: &[Field] = &[
    field("servicio", "servicio", "1"),
    field("product", "product", "2"),
    field("total_bultos", "total_bultos", "1"),
    field("total_kilos", "total_kilos", "1"),
    field("peso_bulto", "pesoBulto", "1"),
    field("observaciones", "observaciones", ""),
    field("referencia_expedicion", "referencia_expedicion", ""),
    field("ref_bulto", "ref_bulto", ""),
    // F: Facturación
    field("clave_portes", "clavePortes", "F"),
    field("clave_reembolso", "claveReembolso", "F"),
    field("valor_reembolso", "valorReembolso", ""),
    field("cliente_nombre", "nombre_consignatario", ""),
    field("cliente_direccion", "direccion_consignatario", ""),
    field("cliente_tipovia", "tipoVia_consignatario", "CL"),
    field("cliente_tnumvia", "tNumVia_consignatario", "N"),
    field("cliente_numvia", "numVia_consignatario", "."),
    field("cliente_escalera", "escalera_consignatario", "."),
    field("cliente_piso", "piso_consignatario", "."),
    field("cliente_puerta", "puerta_consignatario", ""),
    field("cliente_poblacion", "poblacion_consignatario", ""),
    field("cliente_cpostal", "codPostal_consignatario", ""),
    field("cliente_pais", "pais_consignatario", ""),
    field("cliente_email", "email_consignatario", ""),
    field("cliente_telefono", "telefono_consignatario", ""),
    field("cliente_atencion", "atencion_de", ""),
];

/// Champs supplémentaires de la création d'expédition (avisos, sábado...)
pub const SHIPMENT_FIELDS: &[Field] = &[
    field("es_cambio", "cambio", "N"),
    field("cliente_movil", "movil_consignatario", ""),
    field("aviso_preaviso", "test_preaviso", "N"),
    field("aviso_reparto", "test_reparto", "N"),
    field("aviso_email", "test_email", "N"),
    field("aviso_sms", "test_sms", "N"),
    field("id_mercancia", "id_mercancia", ""),
    field("entrega_sabado", "entrega_sabado", "N"),
    field("id_entrega_sabado", "id_entrega_sabado", "N"),
    field("cod_centro", "cod_centro", ""),
];

/// Champs d'une demande de recogida
pub const PICKUP_FIELDS: &[Field] = &[
    field("nombre_empresa", "nombreEmpresa", ""),
    field("razon_social", "razonSocial", ""),
    // Ordenante
    field("ccc_ordenante", "cccOrdenante", ""),
    field("pais_nif_ordenante", "paisNifOrdenante", ""),
    field("nif_ordenante", "nifOrdenante", ""),
    field("nombre_ordenante", "nombreOrdenante", ""),
    field("apellidos_ordenante", "apellidosOrdenante", "."),
    field("cp_ordenante", "cpOrdenante", ""),
    field("tipo_via_ordenante", "tipoViaOrdenante", "CL"),
    field("calle_ordenante", "calleOrdenante", ""),
    field("tipo_num_ordenante", "tipoNumOrdenante", "IN"),
    field("num_ordenante", "numOrdenante", ""),
    field("escalera_ordenante", "escaleraOrdenante", "."),
    field("piso_ordenante", "pisoOrdenante", "."),
    field("puerta_ordenante", "puertaOrdenante", "."),
    field("poblacion_ordenante", "poblacionOrdenante", ""),
    field("provincia_ordenante", "provinciaOrdenante", ""),
    field("pais_ordenante", "paisOrdenante", ""),
    field("idioma_ordenante", "idiomaOrdenante", ""),
    field("pref_fax_ordenante", "prefFaxOrdenante", ""),
    field("fax_ordenante", "faxOrdenante", ""),
    field("mail_ordenante", "mailOrdenante", ""),
    field("pref_tel_ordenante", "prefTelOrdenante", ""),
    field("tel_ordenante", "telOrdenante", ""),
    // Origen
    field("razon_social_origen", "razonSocialOrigen", ""),
    field("nif_origen", "nifOrigen", ""),
    field("nombre_origen", "nombreOrigen", ""),
    field("apellidos_origen", "apellidosOrigen", "."),
    field("cp_origen", "cpOrigen", ""),
    field("tipo_via_origen", "tipoViaOrigen", "CL"),
    field("calle_origen", "calleOrigen", ""),
    field("tipo_num_origen", "tipoNumOrigen", "IN"),
    field("num_origen", "numOrigen", ""),
    field("escalera_origen", "escaleraOrigen", "."),
    field("piso_origen", "pisoOrigen", "."),
    field("puerta_origen", "puertaOrigen", "."),
    field("poblacion_origen", "poblacionOrigen", ""),
    field("provincia_origen", "provinciaOrigen", ""),
    field("pais_origen", "paisOrigen", ""),
    field("pais_nif_origen", "paisNifOrigen", ""),
    field("pref_tel_origen", "prefTelOrigen", ""),
    field("tel_recogida_origen", "telRecogidaOrigen", ""),
    // Destino
    field("razon_social_destino", "razonSocialDestino", ""),
    field("nombre_destino", "nombreDestino", ""),
    field("apellidos_destino", "apellidosDestino", "."),
    field("cp_destino", "cpDestino", ""),
    field("tipo_via_destino", "tipoViaDestino", "CL"),
    field("calle_destino", "calleDestino", ""),
    field("tipo_num_destino", "tipoNumDestino", "IN"),
    field("num_destino", "numDestino", ""),
    field("escalera_destino", "escaleraDestino", "."),
    field("piso_destino", "pisoDestino", "."),
    field("puerta_destino", "puertaDestino", "."),
    field("poblacion_destino", "poblacionDestino", ""),
    field("provincia_destino", "provinciaDestino", ""),
    field("pais_destino", "paisDestino", ""),
    field("pref_tel_destino", "prefTelDestino", ""),
    field("tel_destino", "telDestino", ""),
    // Mercancía
    field("mercancia", "codigoMercancia", "2"),
    field("num_bultos", "numBultos", "1"),
    field("lista_bultos", "listaBultos", "1;1;1;1;1"),
    field("tipo_porte", "tipoPorte", "P"),
    field("producto", "producto", "2"),
    field("servicio", "servicio", "1"),
    // Fecha y franjas horarias
    field("dia_recogida", "diaRecogida", ""),
    field("mes_recogida", "mesRecogida", ""),
    field("anyo_recogida", "anyoRecogida", ""),
    field("hora_manana_de", "horaMananaDe", ""),
    field("hora_manana_a", "horaMananaA", ""),
    field("hora_tarde_de", "horaTardeDe", ""),
    field("hora_tarde_a", "horaTardeA", ""),
    field("ultima_recogida_dia", "ultimaRecogidaDia", ""),
    field("tipo_recogida", "tipoRecogida", "R"),
    field("tipo_envio", "tipoEnvio", "N"),
    field("aviso", "aviso", "N"),
    field("tipo_aviso", "tipoAviso", ""),
    field("entrega_nave", "entregaNave", "N"),
    field("entrega_sabado", "entregaSabado", "N"),
    field("num_referencia", "numReferencia", ""),
    field("notas", "notas", ""),
    field("valor_declarado", "valorDeclarado", "0"),
];

/// Consulta de una expedición
pub const INFO_FIELDS: &[Field] = &[
    field("expedicion", "expedicion", "S"),
    field("reference", "reference", ""),
    field("service", "service", "0"),
    field("public", "public", "N"),
];

/// Listado de expediciones, hors dates (`from` / `to`)
pub const LIST_FIELDS: &[Field] = &[
    field("expedicion", "expedicion", "S"),
    field("service", "service", "0"),
    field("public", "public", "N"),
];

/// Champ résolu : description et valeur retenue
pub type Resolved = Vec<(&'static Field, String)>;

/// Combine une ou plusieurs tables avec les valeurs de l'appelant
///
/// L'ordre des tables, puis des champs, est conservé. Les clés de `data`
/// inconnues des tables sont ignorées.
pub fn resolve(tables: &[&'static [Field]], data: &Data) -> Resolved {
    tables
        .iter()
        .flat_map(|table| table.iter())
        .map(|field| {
            let value = data
                .get(field.key)
                .cloned()
                .unwrap_or_else(|| field.default.to_string());
            (field, value)
        })
        .collect()
}

/// Paires `(balise, valeur)` prêtes à être sérialisées
pub fn tagged(resolved: Resolved) -> impl Iterator<Item = (&'static str, String)> {
    resolved.into_iter().map(|(field, value)| (field.tag, value))
}
