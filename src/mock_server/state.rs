//! Mock server state management.
//!
//! Records are stored as raw JSON objects keyed by resource and ID, the
//! way the Insightly API returns them.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::endpoints::Resource;
use crate::timestamp::format_timestamp;
use crate::Record;

/// Link collections nested inside a record: URL segment, JSON key, ID key.
const LINK_COLLECTIONS: &[(&str, &str, &str)] = &[
    ("Links", "LINKS", "LINK_ID"),
    ("ContactLinks", "CONTACTLINKS", "CONTACT_LINK_ID"),
    ("OrganisationLinks", "ORGANISATIONLINKS", "ORG_LINK_ID"),
];

/// Shared state for the mock server.
#[derive(Debug)]
pub struct MockState {
    /// Records per resource, ordered by ID.
    pub records: HashMap<Resource, BTreeMap<i64, Value>>,

    /// Next identifier handed out for records and links.
    pub next_id: i64,

    /// Optional API key. If set, requests must authenticate with it.
    pub required_api_key: Option<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            next_id: 10_000,
            required_api_key: None,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a typed record. Records without an ID are assigned one.
    pub fn with_record<T: Record>(mut self, record: &T) -> Self {
        if let Ok(json) = record.to_json() {
            self.insert(T::RESOURCE, json);
        }
        self
    }

    /// Require requests to authenticate with this API key.
    pub fn with_required_api_key(mut self, api_key: &str) -> Self {
        self.required_api_key = Some(api_key.to_string());
        self
    }

    /// Number of records stored for a resource.
    pub fn count(&self, resource: Resource) -> usize {
        self.records.get(&resource).map_or(0, BTreeMap::len)
    }

    pub fn get(&self, resource: Resource, id: i64) -> Option<&Value> {
        self.records.get(&resource)?.get(&id)
    }

    /// A `skip`/`top` window over the records, in ID order.
    pub fn list(&self, resource: Resource, skip: usize, top: Option<usize>) -> Vec<Value> {
        let Some(records) = self.records.get(&resource) else {
            return Vec::new();
        };
        records
            .values()
            .skip(skip)
            .take(top.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Records whose fields equal every filter value, ignoring case.
    ///
    /// Filter keys are matched against field names case-insensitively.
    pub fn search(&self, resource: Resource, filter: &[(String, String)]) -> Vec<Value> {
        self.list(resource, 0, None)
            .into_iter()
            .filter(|record| {
                filter
                    .iter()
                    .all(|(key, wanted)| field_matches(record, key, wanted))
            })
            .collect()
    }

    /// Store a new record, assigning its ID and timestamps.
    pub fn insert(&mut self, resource: Resource, mut record: Value) -> Value {
        let id_field = resource.id_field();
        let id = match record.get(id_field).and_then(Value::as_i64) {
            Some(id) => id,
            None => self.allocate_id(),
        };

        if let Value::Object(map) = &mut record {
            let now = Value::from(format_timestamp(&Utc::now()));
            map.insert(id_field.to_string(), id.into());
            map.entry("DATE_CREATED_UTC").or_insert_with(|| now.clone());
            map.insert("DATE_UPDATED_UTC".to_string(), now);
        }

        self.records
            .entry(resource)
            .or_default()
            .insert(id, record.clone());
        record
    }

    /// Replace an existing record wholesale, keeping its creation time.
    pub fn update(&mut self, resource: Resource, id: i64, mut record: Value) -> Option<Value> {
        let existing = self.records.get_mut(&resource)?.get_mut(&id)?;

        if let Value::Object(map) = &mut record {
            map.insert(resource.id_field().to_string(), id.into());
            if let Some(created) = existing.get("DATE_CREATED_UTC") {
                map.insert("DATE_CREATED_UTC".to_string(), created.clone());
            }
            map.insert(
                "DATE_UPDATED_UTC".to_string(),
                format_timestamp(&Utc::now()).into(),
            );
        }

        *existing = record.clone();
        Some(record)
    }

    pub fn remove(&mut self, resource: Resource, id: i64) -> bool {
        self.records
            .get_mut(&resource)
            .and_then(|records| records.remove(&id))
            .is_some()
    }

    /// Append a link to a record's collection, assigning the link ID.
    ///
    /// Returns `None` if the record or collection does not exist.
    pub fn add_link(
        &mut self,
        resource: Resource,
        id: i64,
        collection: &str,
        mut link: Value,
    ) -> Option<Value> {
        let (key, id_key) = link_collection(collection)?;
        let link_id = self.allocate_id();
        if let Value::Object(map) = &mut link {
            map.insert(id_key.to_string(), link_id.into());
        }

        let links = self.links_mut(resource, id, key)?;
        links.push(link.clone());
        Some(link)
    }

    /// Replace a link in a record's collection, matched by its link ID.
    ///
    /// Returns `None` if the record or link does not exist.
    pub fn update_link(
        &mut self,
        resource: Resource,
        id: i64,
        collection: &str,
        link: Value,
    ) -> Option<Value> {
        let (key, id_key) = link_collection(collection)?;
        let link_id = link.get(id_key).and_then(Value::as_i64)?;

        let links = self.links_mut(resource, id, key)?;
        let existing = links
            .iter_mut()
            .find(|l| l.get(id_key).and_then(Value::as_i64) == Some(link_id))?;
        *existing = link.clone();
        Some(link)
    }

    fn links_mut(&mut self, resource: Resource, id: i64, key: &str) -> Option<&mut Vec<Value>> {
        let record = self.records.get_mut(&resource)?.get_mut(&id)?.as_object_mut()?;
        let links = record
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !links.is_array() {
            *links = Value::Array(Vec::new());
        }
        links.as_array_mut()
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn link_collection(segment: &str) -> Option<(&'static str, &'static str)> {
    LINK_COLLECTIONS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(segment))
        .map(|(_, key, id_key)| (*key, *id_key))
}

fn field_matches(record: &Value, key: &str, wanted: &str) -> bool {
    let Some(object) = record.as_object() else {
        return false;
    };
    object
        .iter()
        .find(|(field, _)| field.eq_ignore_ascii_case(key))
        .is_some_and(|(_, value)| match value {
            Value::String(s) => s.eq_ignore_ascii_case(wanted),
            Value::Null => wanted.is_empty(),
            other => other.to_string() == wanted,
        })
}
