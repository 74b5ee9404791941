//! Décodage des étiquettes PDF
//!
//! En mode PDF, SEUR renvoie l'étiquette encodée en base64 dans l'élément
//! `PDF`, éventuellement coupée en lignes.

use crate::error::{Result, SeurError};
use base64::{Engine, engine::general_purpose::STANDARD};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Décode le contenu base64 d'une étiquette PDF
pub fn decode_pdf_label(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| SeurError::InvalidLabel(e.to_string()))?;

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(SeurError::InvalidLabel("missing %PDF header".to_string()));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_base64() {
        let encoded = STANDARD.encode(b"%PDF-1.4\n%EOF");
        let (head, tail) = encoded.split_at(8);
        let wrapped = format!("{}\n  {}\n", head, tail);

        assert_eq!(decode_pdf_label(&wrapped).unwrap(), b"%PDF-1.4\n%EOF");
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode_pdf_label("not base64!"),
            Err(SeurError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_not_a_pdf() {
        let encoded = STANDARD.encode(b"^XA^XZ");
        assert!(matches!(
            decode_pdf_label(&encoded),
            Err(SeurError::InvalidLabel(ref msg)) if msg.contains("%PDF")
        ));
    }
}
