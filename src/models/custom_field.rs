//! Custom field values attached to contacts, organisations and opportunities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An account-defined custom field value.
///
/// Field IDs are the custom field names configured in the Insightly
/// account, typically suffixed with `__c`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct CustomField {
    pub custom_field_id: String,
    pub field_value: Value,
}

impl CustomField {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            custom_field_id: id.into(),
            field_value: value.into(),
        }
    }

    /// The value as a string slice, when it is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.field_value.as_str()
    }
}

/// Find a custom field by ID. The first match wins.
pub(crate) fn find<'a>(fields: &'a [CustomField], id: &str) -> Option<&'a CustomField> {
    fields.iter().find(|f| f.custom_field_id == id)
}

/// Set a custom field, replacing the first field with the same ID.
pub(crate) fn upsert(fields: &mut Vec<CustomField>, id: &str, value: Value) {
    match fields.iter_mut().find(|f| f.custom_field_id == id) {
        Some(field) => field.field_value = value,
        None => fields.push(CustomField::new(id, value)),
    }
}
