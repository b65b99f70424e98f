//! Field compiler.
//!
//! Flattens subsidiary, company, contact and documents-step data into one
//! [`CompiledFieldSet`] consumed by the PDF field mappers. Built fresh per
//! fill request, never persisted.
//!
//! Per-field precedence is an explicit ordered list of lookup sources folded
//! left to right: value captured during the document step > subsidiary
//! headquarters field > empty string. Reordering the sources changes which
//! address appears on generated forms after a mid-wizard edit, so the order
//! is pinned by tests.

use formular_core::models::{Company, Contact, Subsidiary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Card product selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Standard,
    Logo,
    Design,
}

/// Field values captured during the documents wizard step. Every field is
/// optional; present values override the subsidiary's headquarters data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentsStepData {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub register_court: Option<String>,
    pub register_number: Option<String>,
    pub industry_category: Option<String>,
    pub card_type: Option<CardType>,
    pub politically_exposed: Option<bool>,
}

/// Flat record of everything the PDF field mappers consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CompiledFieldSet {
    pub company_name: String,
    pub legal_form: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    pub register_court: String,
    pub register_number: String,
    pub contact_first_name: String,
    pub contact_last_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub card_type: Option<CardType>,
    pub industry_category: String,
    pub politically_exposed: Option<bool>,
}

impl CompiledFieldSet {
    /// "Straße Nr" style combined street line.
    pub fn street_line(&self) -> String {
        join_non_empty(&self.street, &self.house_number)
    }

    /// "PLZ Ort" style combined city line.
    pub fn city_line(&self) -> String {
        join_non_empty(&self.postal_code, &self.city)
    }

    /// Contact full name, "Vorname Nachname".
    pub fn contact_name(&self) -> String {
        join_non_empty(&self.contact_first_name, &self.contact_last_name)
    }
}

fn join_non_empty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => String::new(),
        (false, true) => a.to_string(),
        (true, false) => b.to_string(),
        (false, false) => format!("{} {}", a, b),
    }
}

/// An ordered lookup source for one logical field.
type FieldSource<'a> = &'a dyn Fn() -> Option<String>;

/// Fold lookup sources left to right, taking the first non-empty value.
fn resolve_field(sources: &[FieldSource<'_>]) -> String {
    sources
        .iter()
        .find_map(|source| source().filter(|v| !v.trim().is_empty()))
        .unwrap_or_default()
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Select the contact representing the Ansprechpartner on generated forms.
///
/// First contact whose categories mention "payroll" or "lohn"
/// (case-insensitive substring), else the first contact, else `None`.
pub fn select_contact(contacts: &[Contact]) -> Option<&Contact> {
    contacts
        .iter()
        .find(|c| {
            c.categories.iter().any(|cat| {
                let cat = cat.to_lowercase();
                cat.contains("payroll") || cat.contains("lohn")
            })
        })
        .or_else(|| contacts.first())
}

/// Compile the flat field set for one subsidiary.
pub fn compile_form_data(
    subsidiary: &Subsidiary,
    company: &Company,
    contacts: &[Contact],
    documents: &DocumentsStepData,
) -> CompiledFieldSet {
    let contact = select_contact(contacts);

    // step override > headquarters > empty, per field
    let street = resolve_field(&[
        &|| non_empty(documents.street.as_ref()),
        &|| non_empty(subsidiary.street.as_ref()),
    ]);
    let house_number = resolve_field(&[
        &|| non_empty(documents.house_number.as_ref()),
        &|| non_empty(subsidiary.house_number.as_ref()),
    ]);
    let postal_code = resolve_field(&[
        &|| non_empty(documents.postal_code.as_ref()),
        &|| non_empty(subsidiary.postal_code.as_ref()),
    ]);
    let city = resolve_field(&[
        &|| non_empty(documents.city.as_ref()),
        &|| non_empty(subsidiary.city.as_ref()),
    ]);
    let country = resolve_field(&[
        &|| non_empty(documents.country.as_ref()),
        &|| non_empty(subsidiary.country.as_ref()),
    ]);
    let register_court = resolve_field(&[
        &|| non_empty(documents.register_court.as_ref()),
        &|| non_empty(subsidiary.register_court.as_ref()),
    ]);
    let register_number = resolve_field(&[
        &|| non_empty(documents.register_number.as_ref()),
        &|| non_empty(subsidiary.register_number.as_ref()),
    ]);

    let company_name = if company.name.trim().is_empty() {
        subsidiary.name.trim().to_string()
    } else {
        company.name.trim().to_string()
    };

    CompiledFieldSet {
        company_name,
        legal_form: subsidiary.legal_form.trim().to_string(),
        street,
        house_number,
        postal_code,
        city,
        country,
        register_court,
        register_number,
        contact_first_name: contact.map(|c| c.first_name.clone()).unwrap_or_default(),
        contact_last_name: contact.map(|c| c.last_name.clone()).unwrap_or_default(),
        contact_email: contact
            .and_then(|c| c.email.clone())
            .unwrap_or_default(),
        contact_phone: contact
            .and_then(|c| c.phone.clone())
            .unwrap_or_default(),
        card_type: documents.card_type,
        industry_category: documents.industry_category.clone().unwrap_or_default(),
        politically_exposed: documents.politically_exposed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn subsidiary() -> Subsidiary {
        Subsidiary {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: "Acme Nord GmbH".to_string(),
            legal_form: "GmbH".to_string(),
            street: Some("Hauptstr.".to_string()),
            house_number: Some("1".to_string()),
            postal_code: Some("12345".to_string()),
            city: Some("Berlin".to_string()),
            country: Some("Deutschland".to_string()),
            register_court: Some("Amtsgericht Charlottenburg".to_string()),
            register_number: Some("HRB 12345".to_string()),
        }
    }

    fn company() -> Company {
        Company {
            id: Uuid::new_v4(),
            name: "Acme Holding".to_string(),
        }
    }

    fn contact(first: &str, last: &str, categories: &[&str]) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            subsidiary_id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: Some(format!("{}@example.com", first.to_lowercase())),
            phone: None,
            categories: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_headquarters_used_without_overrides() {
        let compiled = compile_form_data(
            &subsidiary(),
            &company(),
            &[],
            &DocumentsStepData::default(),
        );
        assert_eq!(compiled.street, "Hauptstr.");
        assert_eq!(compiled.street_line(), "Hauptstr. 1");
        assert_eq!(compiled.city_line(), "12345 Berlin");
    }

    #[test]
    fn test_documents_step_override_wins() {
        let documents = DocumentsStepData {
            street: Some("Altstr.".to_string()),
            ..Default::default()
        };
        let compiled = compile_form_data(&subsidiary(), &company(), &[], &documents);
        assert_eq!(compiled.street, "Altstr.");
        // Fields without an override still come from headquarters.
        assert_eq!(compiled.city, "Berlin");
    }

    #[test]
    fn test_blank_override_falls_through_to_headquarters() {
        let documents = DocumentsStepData {
            street: Some("   ".to_string()),
            ..Default::default()
        };
        let compiled = compile_form_data(&subsidiary(), &company(), &[], &documents);
        assert_eq!(compiled.street, "Hauptstr.");
    }

    #[test]
    fn test_missing_everything_degrades_to_empty() {
        let mut sub = subsidiary();
        sub.street = None;
        sub.city = None;
        let compiled = compile_form_data(&sub, &company(), &[], &DocumentsStepData::default());
        assert_eq!(compiled.street, "");
        assert_eq!(compiled.city, "");
        assert_eq!(compiled.city_line(), "12345");
    }

    #[test]
    fn test_payroll_contact_preferred() {
        let contacts = vec![
            contact("Anna", "Admin", &["Management"]),
            contact("Paul", "Payroll", &["Lohnbuchhaltung"]),
        ];
        let compiled = compile_form_data(
            &subsidiary(),
            &company(),
            &contacts,
            &DocumentsStepData::default(),
        );
        assert_eq!(compiled.contact_first_name, "Paul");
        assert_eq!(compiled.contact_name(), "Paul Payroll");
    }

    #[test]
    fn test_payroll_match_is_case_insensitive_substring() {
        let contacts = vec![
            contact("Anna", "Admin", &["Management"]),
            contact("Petra", "Personal", &["HR & PAYROLL"]),
        ];
        let selected = select_contact(&contacts).unwrap();
        assert_eq!(selected.first_name, "Petra");
    }

    #[test]
    fn test_first_contact_fallback_and_empty_placeholder() {
        let contacts = vec![contact("Anna", "Admin", &["Management"])];
        assert_eq!(select_contact(&contacts).unwrap().first_name, "Anna");

        let compiled = compile_form_data(
            &subsidiary(),
            &company(),
            &[],
            &DocumentsStepData::default(),
        );
        assert_eq!(compiled.contact_first_name, "");
        assert_eq!(compiled.contact_name(), "");
    }

    #[test]
    fn test_company_name_falls_back_to_subsidiary_name() {
        let mut comp = company();
        comp.name = "  ".to_string();
        let compiled = compile_form_data(
            &subsidiary(),
            &comp,
            &[],
            &DocumentsStepData::default(),
        );
        assert_eq!(compiled.company_name, "Acme Nord GmbH");
    }
}
