//! Legal-form registry.
//!
//! Maps the free-text legal form recorded on a subsidiary (e.g. "GmbH & Co.
//! KG", "e.V.") to a closed [`LegalForm`] variant, and from there to the
//! canonical [`DocumentType`] that selects the document checklist, the PDF
//! field-name set and the Dokumentationsbogen template.
//!
//! All substring matching lives in exactly one place, [`LegalForm::parse`],
//! evaluated in a fixed priority order. Everything downstream is exhaustive
//! matching on the enum, so rule precedence is visible at compile time.
//! Compound forms must win over their components: "GmbH & Co. KG" contains
//! both "GMBH" and "KG" and must never resolve as plain GmbH, and "PartG"
//! contains "AG" and must be checked before the Aktiengesellschaft rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Registered legal structure of a subsidiary. Immutable once set; drives
/// which document set and which PDF templates apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegalForm {
    Gmbh,
    Ug,
    Ag,
    GmbhCoKg,
    Gbr,
    Kg,
    Ohg,
    Kdoer,
    PartG,
    Verein,
    Genossenschaft,
    Einzelunternehmen,
    Freiberufler,
    EingetragenerKaufmann,
    /// Anything the rule table does not recognize. Carries the raw input so
    /// operators can audit what was actually entered.
    Other(String),
}

impl LegalForm {
    /// Parse a raw legal-form string.
    ///
    /// Normalizes (trim, uppercase) and applies the ordered rule chain.
    /// Never fails: unrecognized input becomes [`LegalForm::Other`].
    pub fn parse(raw: &str) -> LegalForm {
        let norm = raw.trim().to_uppercase();

        // Compound form first: contains both tokens, must not fall through
        // to the plain GmbH or KG rules below.
        if norm.contains("GMBH") && norm.contains("KG") {
            return LegalForm::GmbhCoKg;
        }
        if norm == "GMBH" {
            return LegalForm::Gmbh;
        }
        if norm == "UG" || norm.contains("HAFTUNGSBESCHRÄNKT") {
            return LegalForm::Ug;
        }
        if norm == "GBR" {
            return LegalForm::Gbr;
        }
        if norm.contains("KDÖR") || norm.contains("KDOER") {
            return LegalForm::Kdoer;
        }
        // PartG contains "AG" as a substring; check it before the AG rule.
        if norm.contains("PARTG") {
            return LegalForm::PartG;
        }
        if norm.contains("E.V.") {
            return LegalForm::Verein;
        }
        if norm == "EG" || norm == "E.G." {
            return LegalForm::Genossenschaft;
        }
        if norm.contains("EINZELUNTERNEHMEN") {
            return LegalForm::Einzelunternehmen;
        }
        if norm.contains("FREIBERUFLER") {
            return LegalForm::Freiberufler;
        }
        if norm.contains("E.K.") || norm == "EK" {
            return LegalForm::EingetragenerKaufmann;
        }
        if norm.contains("OHG") {
            return LegalForm::Ohg;
        }
        if norm.contains("KG") {
            return LegalForm::Kg;
        }
        if norm.contains("AG") {
            return LegalForm::Ag;
        }

        LegalForm::Other(raw.trim().to_string())
    }
}

/// Canonical document-type key derived from the legal form.
///
/// Selects the Dokumentationsbogen variant: its document checklist, its PDF
/// field-name set and its template path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Einzelunternehmen,
    Gmbh,
    Ug,
    Ag,
    Gbr,
    KgOhg,
    Kdoer,
    #[serde(rename = "PARTG")]
    PartG,
    VereinGenossenschaft,
    GmbhCoKg,
    /// Generic fallback for unrecognized legal forms. Guarantees the wizard
    /// always has a checklist to render, at the cost of potentially
    /// incomplete compliance data.
    JuristischePerson,
}

impl DocumentType {
    /// Stable string key used on the wire and in persisted form data.
    pub fn key(&self) -> &'static str {
        match self {
            DocumentType::Einzelunternehmen => "EINZELUNTERNEHMEN",
            DocumentType::Gmbh => "GMBH",
            DocumentType::Ug => "UG",
            DocumentType::Ag => "AG",
            DocumentType::Gbr => "GBR",
            DocumentType::KgOhg => "KG_OHG",
            DocumentType::Kdoer => "KDOER",
            DocumentType::PartG => "PARTG",
            DocumentType::VereinGenossenschaft => "VEREIN_GENOSSENSCHAFT",
            DocumentType::GmbhCoKg => "GMBH_CO_KG",
            DocumentType::JuristischePerson => "JURISTISCHE_PERSON",
        }
    }

    /// Human-readable name of the Dokumentationsbogen this type requires.
    pub fn document_name(&self) -> &'static str {
        match self {
            DocumentType::Einzelunternehmen => "Dokumentationsbogen natürliche Person",
            DocumentType::Gmbh | DocumentType::Ug => {
                "Dokumentationsbogen juristische Person (GmbH/UG)"
            }
            DocumentType::Ag => "Dokumentationsbogen juristische Person (AG)",
            DocumentType::Gbr => "Dokumentationsbogen GbR",
            DocumentType::KgOhg => "Dokumentationsbogen juristische Person (KG/OHG)",
            DocumentType::Kdoer => "Dokumentationsbogen Körperschaft des öffentlichen Rechts",
            DocumentType::PartG => "Dokumentationsbogen Partnerschaftsgesellschaft",
            DocumentType::VereinGenossenschaft => "Dokumentationsbogen Verein/Genossenschaft",
            DocumentType::GmbhCoKg => "Dokumentationsbogen GmbH & Co. KG",
            DocumentType::JuristischePerson => {
                "Dokumentationsbogen juristische Person (allgemein)"
            }
        }
    }
}

impl From<&LegalForm> for DocumentType {
    fn from(form: &LegalForm) -> Self {
        match form {
            LegalForm::Gmbh => DocumentType::Gmbh,
            LegalForm::Ug => DocumentType::Ug,
            LegalForm::Ag => DocumentType::Ag,
            LegalForm::GmbhCoKg => DocumentType::GmbhCoKg,
            LegalForm::Gbr => DocumentType::Gbr,
            LegalForm::Kg | LegalForm::Ohg => DocumentType::KgOhg,
            LegalForm::Kdoer => DocumentType::Kdoer,
            LegalForm::PartG => DocumentType::PartG,
            LegalForm::Verein | LegalForm::Genossenschaft => DocumentType::VereinGenossenschaft,
            LegalForm::Einzelunternehmen
            | LegalForm::Freiberufler
            | LegalForm::EingetragenerKaufmann => DocumentType::Einzelunternehmen,
            LegalForm::Other(_) => DocumentType::JuristischePerson,
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EINZELUNTERNEHMEN" => Ok(DocumentType::Einzelunternehmen),
            "GMBH" => Ok(DocumentType::Gmbh),
            "UG" => Ok(DocumentType::Ug),
            "AG" => Ok(DocumentType::Ag),
            "GBR" => Ok(DocumentType::Gbr),
            "KG_OHG" => Ok(DocumentType::KgOhg),
            "KDOER" => Ok(DocumentType::Kdoer),
            "PARTG" => Ok(DocumentType::PartG),
            "VEREIN_GENOSSENSCHAFT" => Ok(DocumentType::VereinGenossenschaft),
            "GMBH_CO_KG" => Ok(DocumentType::GmbhCoKg),
            "JURISTISCHE_PERSON" => Ok(DocumentType::JuristischePerson),
            other => Err(format!("unknown document type key: {}", other)),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Resolve a raw legal-form string to its document type.
///
/// Never fails: unrecognized forms fall back to the generic "juristische
/// Person" type. The fallback is logged at warn level because it silently
/// produces the generic compliance checklist; the API additionally surfaces
/// it as a flag so an operator can confirm the selection was intentional.
pub fn resolve_document_type(legal_form_raw: &str) -> DocumentType {
    let form = LegalForm::parse(legal_form_raw);
    if let LegalForm::Other(ref raw) = form {
        tracing::warn!(
            legal_form = %raw,
            "unrecognized legal form, falling back to generic juristische Person"
        );
    }
    DocumentType::from(&form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_gmbh_co_kg_never_plain_gmbh() {
        for raw in [
            "GmbH & Co. KG",
            "gmbh & co. kg",
            "  GMBH  &  CO.  KG  ",
            "Verwaltungs GmbH & Co. Holding KG",
            "GmbH u. Co. KG",
        ] {
            assert_eq!(
                resolve_document_type(raw),
                DocumentType::GmbhCoKg,
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn test_exact_matches() {
        assert_eq!(resolve_document_type("GmbH"), DocumentType::Gmbh);
        assert_eq!(resolve_document_type(" gmbh "), DocumentType::Gmbh);
        assert_eq!(resolve_document_type("UG"), DocumentType::Ug);
        assert_eq!(
            resolve_document_type("UG (haftungsbeschränkt)"),
            DocumentType::Ug
        );
        assert_eq!(resolve_document_type("GbR"), DocumentType::Gbr);
    }

    #[test]
    fn test_partg_not_misread_as_ag() {
        // "PARTG" contains the substring "AG"
        assert_eq!(resolve_document_type("PartG"), DocumentType::PartG);
        assert_eq!(resolve_document_type("PartG mbB"), DocumentType::PartG);
        assert_eq!(resolve_document_type("AG"), DocumentType::Ag);
    }

    #[test]
    fn test_kg_ohg_family() {
        assert_eq!(resolve_document_type("KG"), DocumentType::KgOhg);
        assert_eq!(resolve_document_type("OHG"), DocumentType::KgOhg);
        assert_eq!(resolve_document_type("Müller & Sohn KG"), DocumentType::KgOhg);
    }

    #[test]
    fn test_verein_genossenschaft() {
        assert_eq!(
            resolve_document_type("e.V."),
            DocumentType::VereinGenossenschaft
        );
        assert_eq!(
            resolve_document_type("Sportverein Hinterberg e.V."),
            DocumentType::VereinGenossenschaft
        );
        assert_eq!(
            resolve_document_type("eG"),
            DocumentType::VereinGenossenschaft
        );
        assert_eq!(
            DocumentType::VereinGenossenschaft.document_name(),
            "Dokumentationsbogen Verein/Genossenschaft"
        );
    }

    #[test]
    fn test_natural_person_family() {
        assert_eq!(
            resolve_document_type("Einzelunternehmen"),
            DocumentType::Einzelunternehmen
        );
        assert_eq!(
            resolve_document_type("Freiberufler"),
            DocumentType::Einzelunternehmen
        );
        assert_eq!(
            resolve_document_type("e.K."),
            DocumentType::Einzelunternehmen
        );
    }

    #[test]
    fn test_kdoer() {
        assert_eq!(resolve_document_type("KdöR"), DocumentType::Kdoer);
        assert_eq!(resolve_document_type("KdoeR"), DocumentType::Kdoer);
    }

    #[test]
    fn test_unknown_falls_back_to_generic() {
        for raw in ["Stiftung", "Ltd.", "", "???"] {
            assert_eq!(
                resolve_document_type(raw),
                DocumentType::JuristischePerson,
                "input: {raw:?}"
            );
        }
    }

    #[test]
    fn test_document_type_serde_keys() {
        let json = serde_json::to_string(&DocumentType::GmbhCoKg).unwrap();
        assert_eq!(json, "\"GMBH_CO_KG\"");
        let json = serde_json::to_string(&DocumentType::PartG).unwrap();
        assert_eq!(json, "\"PARTG\"");
        let back: DocumentType = serde_json::from_str("\"EINZELUNTERNEHMEN\"").unwrap();
        assert_eq!(back, DocumentType::Einzelunternehmen);
    }

    #[test]
    fn test_document_type_from_str_roundtrip() {
        for ty in [
            DocumentType::Einzelunternehmen,
            DocumentType::Gmbh,
            DocumentType::Ug,
            DocumentType::Ag,
            DocumentType::Gbr,
            DocumentType::KgOhg,
            DocumentType::Kdoer,
            DocumentType::PartG,
            DocumentType::VereinGenossenschaft,
            DocumentType::GmbhCoKg,
            DocumentType::JuristischePerson,
        ] {
            assert_eq!(ty.key().parse::<DocumentType>().unwrap(), ty);
        }
    }
}
