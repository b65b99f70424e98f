//! Document requirement resolver.
//!
//! Given a resolved [`DocumentType`] and the wizard answers collected so far,
//! returns the checklist of document slots the subsidiary has to provide.
//! Slots are declared in a fixed per-type table; conditional slots carry a
//! [`SlotCondition`] predicate evaluated against [`WizardAnswers`], so the
//! rule set is testable independently of any rendering layer.
//!
//! Slots are derived on every call and never persisted; only the uploaded
//! file metadata that ends up in the onboarding form data is durable.

use crate::legal_form::DocumentType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// In-progress answers from the onboarding wizard that influence which
/// document slots apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardAnswers {
    /// AG only: is the company listed on a stock exchange?
    pub listed_on_exchange: Option<bool>,
    /// KG/OHG only: does a corporate (non-natural-person) representative
    /// exist?
    pub has_corporate_representative: Option<bool>,
    /// Verein/Genossenschaft only: provide a register extract instead of
    /// articles plus meeting minutes.
    pub prefers_register_extract: Option<bool>,
}

/// Predicate deciding whether a conditional slot applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlotCondition {
    /// Company reports it is listed on a stock exchange.
    ListedOnExchange,
    /// Company reports it is *not* listed (unanswered counts as not listed).
    NotListedOnExchange,
    /// A corporate representative exists.
    CorporateRepresentative,
    /// The register-extract toggle is on (unanswered counts as on).
    RegisterExtractChosen,
    /// The register-extract toggle is off.
    ArticlesAndMinutesChosen,
}

impl SlotCondition {
    /// Evaluate the predicate against the current answers.
    pub fn applies(&self, answers: &WizardAnswers) -> bool {
        match self {
            SlotCondition::ListedOnExchange => answers.listed_on_exchange == Some(true),
            SlotCondition::NotListedOnExchange => answers.listed_on_exchange != Some(true),
            SlotCondition::CorporateRepresentative => {
                answers.has_corporate_representative == Some(true)
            }
            SlotCondition::RegisterExtractChosen => {
                answers.prefers_register_extract.unwrap_or(true)
            }
            SlotCondition::ArticlesAndMinutesChosen => {
                !answers.prefers_register_extract.unwrap_or(true)
            }
        }
    }
}

/// One required document in the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSlot {
    /// Stable key, also used as the storage sub-path and the form-data key.
    pub key: &'static str,
    /// Human-readable German label shown in the wizard.
    pub label: &'static str,
    /// Whether the wizard blocks completion on this slot.
    pub required: bool,
    /// Condition that made this slot apply, if it was conditional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<SlotCondition>,
}

impl DocumentSlot {
    const fn required(key: &'static str, label: &'static str) -> Self {
        DocumentSlot {
            key,
            label,
            required: true,
            condition: None,
        }
    }

    const fn conditional(
        key: &'static str,
        label: &'static str,
        condition: SlotCondition,
    ) -> Self {
        DocumentSlot {
            key,
            label,
            required: true,
            condition: Some(condition),
        }
    }

    const fn optional(key: &'static str, label: &'static str) -> Self {
        DocumentSlot {
            key,
            label,
            required: false,
            condition: None,
        }
    }
}

const EINZELUNTERNEHMEN_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required(
        "gewerbeanmeldung",
        "Gewerbeanmeldung bzw. Nachweis der freiberuflichen Tätigkeit",
    ),
    DocumentSlot::optional("handelsregisterauszug", "Handelsregisterauszug (nur e.K.)"),
];

const GMBH_UG_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("handelsregisterauszug", "Aktueller Handelsregisterauszug"),
    DocumentSlot::required("gesellschafterliste", "Gesellschafterliste"),
    DocumentSlot::required("transparenzregisterauszug", "Transparenzregisterauszug"),
];

const AG_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("handelsregisterauszug", "Aktueller Handelsregisterauszug"),
    DocumentSlot::conditional(
        "transparenzregisterauszug",
        "Transparenzregisterauszug",
        SlotCondition::NotListedOnExchange,
    ),
    DocumentSlot::conditional(
        "boersennachweis",
        "Nachweis der Börsennotierung",
        SlotCondition::ListedOnExchange,
    ),
];

const GBR_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("gesellschaftsvertrag", "Gesellschaftsvertrag"),
    DocumentSlot::required("gesellschafterliste", "Liste der Gesellschafter"),
];

const KG_OHG_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("handelsregisterauszug", "Aktueller Handelsregisterauszug"),
    DocumentSlot::required("transparenzregisterauszug", "Transparenzregisterauszug"),
    DocumentSlot::conditional(
        "handelsregisterauszug_komplementaer",
        "Handelsregisterauszug der vertretungsberechtigten juristischen Person",
        SlotCondition::CorporateRepresentative,
    ),
];

const KDOER_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("errichtungsakt", "Errichtungsakt bzw. Satzung"),
    DocumentSlot::required("vertretungsnachweis", "Nachweis der Vertretungsberechtigung"),
];

const PARTG_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required(
        "partnerschaftsregisterauszug",
        "Partnerschaftsregisterauszug",
    ),
    DocumentSlot::required("transparenzregisterauszug", "Transparenzregisterauszug"),
];

const VEREIN_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::conditional(
        "registerauszug",
        "Vereins- bzw. Genossenschaftsregisterauszug",
        SlotCondition::RegisterExtractChosen,
    ),
    DocumentSlot::conditional("satzung", "Satzung", SlotCondition::ArticlesAndMinutesChosen),
    DocumentSlot::conditional(
        "protokoll_mitgliederversammlung",
        "Protokoll der letzten Mitgliederversammlung",
        SlotCondition::ArticlesAndMinutesChosen,
    ),
];

const GMBH_CO_KG_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("handelsregisterauszug_kg", "Handelsregisterauszug der KG"),
    DocumentSlot::required(
        "handelsregisterauszug_komplementaer",
        "Handelsregisterauszug der Komplementär-GmbH",
    ),
    DocumentSlot::required(
        "gesellschafterliste",
        "Gesellschafterliste der Komplementär-GmbH",
    ),
    DocumentSlot::required("transparenzregisterauszug", "Transparenzregisterauszug"),
];

const JURISTISCHE_PERSON_SLOTS: &[DocumentSlot] = &[
    DocumentSlot::required("registerauszug", "Registerauszug bzw. Existenznachweis"),
    DocumentSlot::required("transparenzregisterauszug", "Transparenzregisterauszug"),
];

/// Fixed slot table per document type. Conditional slots are filtered by
/// their predicate at resolution time.
fn slot_table(document_type: DocumentType) -> &'static [DocumentSlot] {
    match document_type {
        DocumentType::Einzelunternehmen => EINZELUNTERNEHMEN_SLOTS,
        DocumentType::Gmbh | DocumentType::Ug => GMBH_UG_SLOTS,
        DocumentType::Ag => AG_SLOTS,
        DocumentType::Gbr => GBR_SLOTS,
        DocumentType::KgOhg => KG_OHG_SLOTS,
        DocumentType::Kdoer => KDOER_SLOTS,
        DocumentType::PartG => PARTG_SLOTS,
        DocumentType::VereinGenossenschaft => VEREIN_SLOTS,
        DocumentType::GmbhCoKg => GMBH_CO_KG_SLOTS,
        DocumentType::JuristischePerson => JURISTISCHE_PERSON_SLOTS,
    }
}

/// Resolve the document checklist for a document type and the answers given
/// so far. Always returns a non-empty list, including for the generic
/// fallback type.
pub fn required_document_slots(
    document_type: DocumentType,
    answers: &WizardAnswers,
) -> Vec<DocumentSlot> {
    slot_table(document_type)
        .iter()
        .filter(|slot| slot.condition.map_or(true, |c| c.applies(answers)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legal_form::resolve_document_type;

    fn keys(slots: &[DocumentSlot]) -> Vec<&'static str> {
        slots.iter().map(|s| s.key).collect()
    }

    #[test]
    fn test_every_type_yields_non_empty_checklist() {
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
            let slots = required_document_slots(ty, &WizardAnswers::default());
            assert!(!slots.is_empty(), "empty checklist for {ty:?}");
        }
    }

    #[test]
    fn test_unknown_legal_form_still_has_checklist() {
        let ty = resolve_document_type("Société Anonyme (Luxembourg)");
        assert_eq!(ty, DocumentType::JuristischePerson);
        let slots = required_document_slots(ty, &WizardAnswers::default());
        assert!(!slots.is_empty());
    }

    #[test]
    fn test_ag_transparency_register_only_when_not_listed() {
        let not_listed = WizardAnswers {
            listed_on_exchange: Some(false),
            ..Default::default()
        };
        let slots = required_document_slots(DocumentType::Ag, &not_listed);
        assert!(keys(&slots).contains(&"transparenzregisterauszug"));
        assert!(!keys(&slots).contains(&"boersennachweis"));

        let listed = WizardAnswers {
            listed_on_exchange: Some(true),
            ..Default::default()
        };
        let slots = required_document_slots(DocumentType::Ag, &listed);
        assert!(!keys(&slots).contains(&"transparenzregisterauszug"));
        assert!(keys(&slots).contains(&"boersennachweis"));

        // Unanswered counts as not listed.
        let slots = required_document_slots(DocumentType::Ag, &WizardAnswers::default());
        assert!(keys(&slots).contains(&"transparenzregisterauszug"));
    }

    #[test]
    fn test_kg_ohg_corporate_representative_extract() {
        let answers = WizardAnswers {
            has_corporate_representative: Some(true),
            ..Default::default()
        };
        let slots = required_document_slots(DocumentType::KgOhg, &answers);
        assert!(keys(&slots).contains(&"handelsregisterauszug_komplementaer"));

        let slots = required_document_slots(DocumentType::KgOhg, &WizardAnswers::default());
        assert!(!keys(&slots).contains(&"handelsregisterauszug_komplementaer"));
    }

    #[test]
    fn test_verein_register_extract_or_articles_plus_minutes() {
        let register = WizardAnswers {
            prefers_register_extract: Some(true),
            ..Default::default()
        };
        let slots = required_document_slots(DocumentType::VereinGenossenschaft, &register);
        assert_eq!(keys(&slots), vec!["registerauszug"]);

        let articles = WizardAnswers {
            prefers_register_extract: Some(false),
            ..Default::default()
        };
        let slots = required_document_slots(DocumentType::VereinGenossenschaft, &articles);
        assert_eq!(
            keys(&slots),
            vec!["satzung", "protokoll_mitgliederversammlung"]
        );
    }

    #[test]
    fn test_gmbh_co_kg_checklist_includes_both_register_extracts() {
        let slots = required_document_slots(DocumentType::GmbhCoKg, &WizardAnswers::default());
        let k = keys(&slots);
        assert!(k.contains(&"handelsregisterauszug_kg"));
        assert!(k.contains(&"handelsregisterauszug_komplementaer"));
    }
}
