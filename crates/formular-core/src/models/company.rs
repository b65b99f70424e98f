//! Company, subsidiary and contact master data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
}

/// A subsidiary of a company. The legal form is free text as entered during
/// registration and is immutable once set; it drives document resolution.
/// Address and register fields describe the registered headquarters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsidiary {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub legal_form: String,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub register_court: Option<String>,
    pub register_number: Option<String>,
}

/// A contact person attached to a subsidiary. `categories` holds free-text
/// role tags; a contact tagged with "payroll"/"lohn" is preferred as the
/// Ansprechpartner on generated forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub subsidiary_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub categories: Vec<String>,
}
