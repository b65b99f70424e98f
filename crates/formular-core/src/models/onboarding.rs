//! Onboarding progress record.
//!
//! One record per subsidiary, keyed by subsidiary id. `form_data` is an
//! arbitrary JSON object merged incrementally by feature area (`documents`,
//! `orderForms`, ...). The document pipeline only reads and merges into those
//! sections; the surrounding wizard owns creation, step advancement and
//! completion. Concurrent writers are not coordinated: last write wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProgress {
    pub subsidiary_id: Uuid,
    pub current_step: i32,
    pub form_data: JsonValue,
    pub last_updated: DateTime<Utc>,
}

impl OnboardingProgress {
    /// Read a section of the form data, e.g. `documents` or `orderForms`.
    /// Missing sections read as `Null`.
    pub fn section(&self, name: &str) -> &JsonValue {
        self.form_data.get(name).unwrap_or(&JsonValue::Null)
    }
}

/// Shallow-merge `value` into the named section of `form_data`.
///
/// When both the existing section and the new value are objects, keys are
/// merged with the new value winning per key; otherwise the section is
/// replaced wholesale. The root is coerced to an object if it is not one.
pub fn merge_form_data_section(form_data: &mut JsonValue, section: &str, value: &JsonValue) {
    if !form_data.is_object() {
        *form_data = JsonValue::Object(serde_json::Map::new());
    }
    let JsonValue::Object(root) = form_data else {
        return;
    };

    match (root.get_mut(section), value.as_object()) {
        (Some(JsonValue::Object(existing)), Some(incoming)) => {
            for (k, v) in incoming {
                existing.insert(k.clone(), v.clone());
            }
        }
        _ => {
            root.insert(section.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_into_missing_section() {
        let mut form_data = json!({});
        merge_form_data_section(&mut form_data, "documents", &json!({"street": "Altstr."}));
        assert_eq!(form_data, json!({"documents": {"street": "Altstr."}}));
    }

    #[test]
    fn test_merge_preserves_sibling_keys() {
        let mut form_data = json!({
            "documents": {"street": "Hauptstr.", "city": "Berlin"},
            "orderForms": {"cardType": "standard"}
        });
        merge_form_data_section(&mut form_data, "documents", &json!({"street": "Altstr."}));
        assert_eq!(
            form_data,
            json!({
                "documents": {"street": "Altstr.", "city": "Berlin"},
                "orderForms": {"cardType": "standard"}
            })
        );
    }

    #[test]
    fn test_merge_replaces_non_object_section() {
        let mut form_data = json!({"documents": "legacy"});
        merge_form_data_section(&mut form_data, "documents", &json!({"a": 1}));
        assert_eq!(form_data, json!({"documents": {"a": 1}}));
    }

    #[test]
    fn test_merge_coerces_non_object_root() {
        let mut form_data = JsonValue::Null;
        merge_form_data_section(&mut form_data, "orderForms", &json!({"a": 1}));
        assert_eq!(form_data, json!({"orderForms": {"a": 1}}));
    }

    #[test]
    fn test_section_accessor() {
        let progress = OnboardingProgress {
            subsidiary_id: Uuid::new_v4(),
            current_step: 3,
            form_data: json!({"documents": {"street": "Hauptstr."}}),
            last_updated: Utc::now(),
        };
        assert_eq!(
            progress.section("documents"),
            &json!({"street": "Hauptstr."})
        );
        assert_eq!(progress.section("missing"), &JsonValue::Null);
    }
}
