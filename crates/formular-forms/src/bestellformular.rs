//! Bestellformular field mapping.
//!
//! The card order form is independent of the legal form: one fixed set of
//! literal PDF field names. The three card-type checkboxes are mutually
//! exclusive and always emitted as a complete group (every member explicitly
//! "Off" except the selection) because the filler leaves absent keys
//! untouched, which would leak stale values from a reused template.

use crate::compile::{CardType, CompiledFieldSet};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

const CARD_CHECKBOXES: [(&str, CardType); 3] = [
    ("givve StandardCard", CardType::Standard),
    ("givve LogoCard", CardType::Logo),
    ("givve DesignCard", CardType::Design),
];

/// Map the compiled field set onto the Bestellformular's PDF field names.
/// The date field is auto-filled with the current date in German format.
pub fn map_bestellformular(data: &CompiledFieldSet) -> BTreeMap<String, String> {
    map_bestellformular_on(data, Utc::now().date_naive())
}

/// Mapping with an explicit date, kept separate so tests control the clock.
pub fn map_bestellformular_on(
    data: &CompiledFieldSet,
    date: NaiveDate,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    fields.insert("Firma".to_string(), data.company_name.clone());
    fields.insert("Straße Nr".to_string(), data.street_line());
    fields.insert("PLZ Ort".to_string(), data.city_line());
    fields.insert("Ansprechpartner".to_string(), data.contact_name());
    fields.insert("E-Mail".to_string(), data.contact_email.clone());
    fields.insert("Telefon".to_string(), data.contact_phone.clone());

    for (field, card_type) in CARD_CHECKBOXES {
        let checked = data.card_type == Some(card_type);
        fields.insert(
            field.to_string(),
            if checked { "Yes" } else { "Off" }.to_string(),
        );
    }

    fields.insert("Datum".to_string(), date.format("%d.%m.%Y").to_string());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(card_type: Option<CardType>) -> CompiledFieldSet {
        CompiledFieldSet {
            company_name: "Acme GmbH".to_string(),
            street: "Hauptstr.".to_string(),
            house_number: "1".to_string(),
            postal_code: "12345".to_string(),
            city: "Berlin".to_string(),
            contact_first_name: "Paul".to_string(),
            contact_last_name: "Payroll".to_string(),
            contact_email: "paul@example.com".to_string(),
            card_type,
            ..Default::default()
        }
    }

    fn card_states(fields: &BTreeMap<String, String>) -> Vec<&str> {
        CARD_CHECKBOXES
            .iter()
            .map(|(name, _)| fields[*name].as_str())
            .collect()
    }

    #[test]
    fn test_exactly_one_card_checkbox_per_type() {
        for (card_type, expected) in [
            (CardType::Standard, ["Yes", "Off", "Off"]),
            (CardType::Logo, ["Off", "Yes", "Off"]),
            (CardType::Design, ["Off", "Off", "Yes"]),
        ] {
            let fields = map_bestellformular(&data(Some(card_type)));
            assert_eq!(card_states(&fields), expected, "card type {card_type:?}");
        }
    }

    #[test]
    fn test_no_card_type_leaves_all_checkboxes_off() {
        let fields = map_bestellformular(&data(None));
        assert_eq!(card_states(&fields), ["Off", "Off", "Off"]);
    }

    #[test]
    fn test_literal_field_values() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let fields = map_bestellformular_on(&data(Some(CardType::Standard)), date);
        assert_eq!(fields["Firma"], "Acme GmbH");
        assert_eq!(fields["Straße Nr"], "Hauptstr. 1");
        assert_eq!(fields["PLZ Ort"], "12345 Berlin");
        assert_eq!(fields["Ansprechpartner"], "Paul Payroll");
        assert_eq!(fields["E-Mail"], "paul@example.com");
        assert_eq!(fields["Datum"], "05.03.2026");
    }
}
