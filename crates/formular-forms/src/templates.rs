//! Template path table.
//!
//! One fixed path per resolved document type, relative to the configured
//! template directory. Paths are versioned together with the field maps: a
//! template swap requires updating the corresponding mapping table.

use formular_core::legal_form::DocumentType;

/// The card order form template, independent of legal form.
pub fn bestellformular_template() -> &'static str {
    "templates/UPgivve_Bestellformular.pdf"
}

/// The Dokumentationsbogen template for a resolved document type.
pub fn dokumentationsbogen_template(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Einzelunternehmen => "templates/Dokumentationsbogen_natuerliche_Person.pdf",
        DocumentType::Gmbh | DocumentType::Ug => "templates/Dokumentationsbogen_JP_GmbH_UG.pdf",
        DocumentType::Ag => "templates/Dokumentationsbogen_JP_AG.pdf",
        DocumentType::Gbr => "templates/Dokumentationsbogen_GbR.pdf",
        DocumentType::KgOhg => "templates/Dokumentationsbogen_JP_KG_OHG.pdf",
        DocumentType::GmbhCoKg => "templates/UPgivve_Dokumentationsbogen_JP_GmbH_CoKG.pdf",
        DocumentType::Kdoer
        | DocumentType::PartG
        | DocumentType::VereinGenossenschaft
        | DocumentType::JuristischePerson => "templates/Dokumentationsbogen_JP_allgemein.pdf",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formular_core::legal_form::resolve_document_type;

    #[test]
    fn test_gmbh_co_kg_template_path() {
        let ty = resolve_document_type("GmbH & Co. KG");
        assert_eq!(ty, DocumentType::GmbhCoKg);
        assert_eq!(
            dokumentationsbogen_template(ty),
            "templates/UPgivve_Dokumentationsbogen_JP_GmbH_CoKG.pdf"
        );
    }

    #[test]
    fn test_unknown_form_gets_generic_template() {
        let ty = resolve_document_type("Anstalt öffentlichen Rechts");
        assert_eq!(
            dokumentationsbogen_template(ty),
            "templates/Dokumentationsbogen_JP_allgemein.pdf"
        );
    }
}
