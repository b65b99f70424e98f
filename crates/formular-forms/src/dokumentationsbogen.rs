//! Dokumentationsbogen field mapping.
//!
//! The GwG documentation form varies by legal form; each resolved
//! [`DocumentType`] selects one of five literal field-name sets (natural
//! person, GmbH/UG, AG, GbR, KG/OHG) or the generic fallback set. Field
//! names match the PDF templates by exact string; a template change requires
//! a corresponding update here.
//!
//! Checkbox groups are always emitted complete: every member explicitly
//! "Off" except the selection. The filler treats absent keys as "leave the
//! field untouched", so an incomplete group would leak whatever the template
//! author left checked.

use crate::compile::CompiledFieldSet;
use formular_core::legal_form::{DocumentType, LegalForm};
use std::collections::BTreeMap;

/// The 21 industry checkbox field names on the natural-person form, in
/// template order.
pub const INDUSTRY_FIELDS: [&str; 21] = [
    "Baugewerbe",
    "Einzelhandel",
    "Großhandel",
    "Gastronomie",
    "Hotelgewerbe",
    "Handwerk",
    "Gesundheitswesen",
    "Pflege und Soziales",
    "IT und Software",
    "Beratung",
    "Finanzdienstleistungen",
    "Versicherungen",
    "Immobilien",
    "Industrie und Produktion",
    "Land- und Forstwirtschaft",
    "Logistik und Transport",
    "Medien und Marketing",
    "Bildung und Forschung",
    "Rechts- und Steuerberatung",
    "Öffentlicher Dienst",
    "Sonstige Dienstleistungen",
];

/// Translation table from free-text industry categories (German and English
/// spellings seen in the wizard) to the checkbox field name. Lookup is by
/// trimmed, lowercased equality; anything not in the table leaves the whole
/// group unchecked.
const INDUSTRY_TRANSLATIONS: &[(&str, &str)] = &[
    ("baugewerbe", "Baugewerbe"),
    ("bau", "Baugewerbe"),
    ("construction", "Baugewerbe"),
    ("einzelhandel", "Einzelhandel"),
    ("retail", "Einzelhandel"),
    ("großhandel", "Großhandel"),
    ("grosshandel", "Großhandel"),
    ("wholesale", "Großhandel"),
    ("gastronomie", "Gastronomie"),
    ("gastro", "Gastronomie"),
    ("hotelgewerbe", "Hotelgewerbe"),
    ("hotellerie", "Hotelgewerbe"),
    ("handwerk", "Handwerk"),
    ("gesundheitswesen", "Gesundheitswesen"),
    ("healthcare", "Gesundheitswesen"),
    ("pflege", "Pflege und Soziales"),
    ("pflege und soziales", "Pflege und Soziales"),
    ("it", "IT und Software"),
    ("it und software", "IT und Software"),
    ("software", "IT und Software"),
    ("beratung", "Beratung"),
    ("consulting", "Beratung"),
    ("finanzdienstleistungen", "Finanzdienstleistungen"),
    ("finance", "Finanzdienstleistungen"),
    ("versicherungen", "Versicherungen"),
    ("versicherung", "Versicherungen"),
    ("immobilien", "Immobilien"),
    ("real estate", "Immobilien"),
    ("industrie", "Industrie und Produktion"),
    ("industrie und produktion", "Industrie und Produktion"),
    ("produktion", "Industrie und Produktion"),
    ("landwirtschaft", "Land- und Forstwirtschaft"),
    ("land- und forstwirtschaft", "Land- und Forstwirtschaft"),
    ("logistik", "Logistik und Transport"),
    ("logistik und transport", "Logistik und Transport"),
    ("transport", "Logistik und Transport"),
    ("medien", "Medien und Marketing"),
    ("medien und marketing", "Medien und Marketing"),
    ("marketing", "Medien und Marketing"),
    ("bildung", "Bildung und Forschung"),
    ("bildung und forschung", "Bildung und Forschung"),
    ("rechts- und steuerberatung", "Rechts- und Steuerberatung"),
    ("steuerberatung", "Rechts- und Steuerberatung"),
    ("öffentlicher dienst", "Öffentlicher Dienst"),
    ("oeffentlicher dienst", "Öffentlicher Dienst"),
    ("sonstige", "Sonstige Dienstleistungen"),
    ("sonstige dienstleistungen", "Sonstige Dienstleistungen"),
];

/// Look up the industry checkbox for a free-text category.
pub fn industry_field_for(category: &str) -> Option<&'static str> {
    let needle = category.trim().to_lowercase();
    INDUSTRY_TRANSLATIONS
        .iter()
        .find(|(key, _)| *key == needle)
        .map(|(_, field)| *field)
}

/// Map the compiled field set onto the Dokumentationsbogen variant for the
/// given document type.
pub fn map_dokumentationsbogen(
    data: &CompiledFieldSet,
    document_type: DocumentType,
) -> BTreeMap<String, String> {
    match document_type {
        DocumentType::Einzelunternehmen => map_natural_person(data),
        DocumentType::Gmbh | DocumentType::Ug => map_gmbh_ug(data),
        DocumentType::Ag => map_ag(data),
        DocumentType::Gbr => map_gbr(data),
        DocumentType::KgOhg | DocumentType::GmbhCoKg => map_kg_ohg(data),
        DocumentType::Kdoer
        | DocumentType::PartG
        | DocumentType::VereinGenossenschaft
        | DocumentType::JuristischePerson => map_generic(data),
    }
}

fn map_natural_person(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    fields.insert(
        "Name, Vorname".to_string(),
        match (
            data.contact_last_name.is_empty(),
            data.contact_first_name.is_empty(),
        ) {
            (false, false) => format!("{}, {}", data.contact_last_name, data.contact_first_name),
            _ => data.company_name.clone(),
        },
    );
    fields.insert("Straße Hausnummer".to_string(), data.street_line());
    fields.insert("PLZ Ort".to_string(), data.city_line());

    // Business-form trio, one-hot on the parsed legal form.
    let selected = match LegalForm::parse(&data.legal_form) {
        LegalForm::Freiberufler => "Freiberufler",
        LegalForm::EingetragenerKaufmann => "eingetragener Kaufmann",
        _ => "Einzelunternehmen",
    };
    for name in ["Einzelunternehmen", "Freiberufler", "eingetragener Kaufmann"] {
        fields.insert(
            name.to_string(),
            if name == selected { "Yes" } else { "Off" }.to_string(),
        );
    }

    // Industry group, one-hot via the translation table; unknown categories
    // leave every box "Off".
    let industry = industry_field_for(&data.industry_category);
    for name in INDUSTRY_FIELDS {
        fields.insert(
            name.to_string(),
            if Some(name) == industry { "Yes" } else { "Off" }.to_string(),
        );
    }

    // PEP pair defaults to "no PEP" unless explicitly overridden.
    let pep = data.politically_exposed == Some(true);
    fields.insert(
        "PEP ja".to_string(),
        if pep { "Yes" } else { "Off" }.to_string(),
    );
    fields.insert(
        "PEP nein".to_string(),
        if pep { "Off" } else { "Yes" }.to_string(),
    );

    fields
}

fn map_gmbh_ug(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("Firma".to_string(), data.company_name.clone());
    fields.insert("Straße Hausnummer".to_string(), data.street_line());
    fields.insert("Sitz der Gesellschaft".to_string(), data.city_line());
    fields.insert("Registergericht".to_string(), data.register_court.clone());
    fields.insert("Registernummer".to_string(), data.register_number.clone());
    fields.insert(
        "Vertretungsberechtigte Person".to_string(),
        data.contact_name(),
    );
    fields
}

fn map_ag(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("Firma".to_string(), data.company_name.clone());
    fields.insert("Straße Hausnummer".to_string(), data.street_line());
    fields.insert("Sitz der Gesellschaft".to_string(), data.city_line());
    fields.insert("Registergericht".to_string(), data.register_court.clone());
    fields.insert("HRB Nummer".to_string(), data.register_number.clone());
    fields.insert(
        "Vertretungsberechtigtes Vorstandsmitglied".to_string(),
        data.contact_name(),
    );
    fields
}

fn map_gbr(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("Name der GbR".to_string(), data.company_name.clone());
    fields.insert("Anschrift".to_string(), data.street_line());
    fields.insert("PLZ Ort".to_string(), data.city_line());
    fields.insert("Gesellschafter 1".to_string(), data.contact_name());
    fields
}

fn map_kg_ohg(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("Firma".to_string(), data.company_name.clone());
    fields.insert("Straße Hausnummer".to_string(), data.street_line());
    fields.insert("PLZ Ort".to_string(), data.city_line());
    fields.insert("Registergericht".to_string(), data.register_court.clone());
    fields.insert("HRA Nummer".to_string(), data.register_number.clone());
    fields.insert(
        "Persönlich haftender Gesellschafter".to_string(),
        data.contact_name(),
    );
    fields
}

fn map_generic(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("Firma".to_string(), data.company_name.clone());
    fields.insert("Straße Hausnummer".to_string(), data.street_line());
    fields.insert("PLZ Ort".to_string(), data.city_line());
    fields.insert("Registergericht".to_string(), data.register_court.clone());
    fields.insert("Registernummer".to_string(), data.register_number.clone());
    fields
}
