//! Record trait shared by all top-level entities.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::endpoints::Resource;
use crate::error::{InsightlyError, Result};

/// A top-level Insightly entity backed by a resource collection.
///
/// Provides the JSON conversions every entity shares and the metadata the
/// operation traits need to find the right endpoints.
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    /// The resource collection this entity belongs to.
    const RESOURCE: Resource;

    /// Singular entity name, used in log and error messages.
    const ENTITY: &'static str;

    /// The server-assigned identifier, `None` until first saved.
    fn id(&self) -> Option<i64>;

    /// Whether the entity has not been created on the server yet.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    /// The identifier, or [`InsightlyError::MissingId`] for a new entity.
    fn require_id(&self) -> Result<i64> {
        self.id()
            .ok_or(InsightlyError::MissingId { entity: Self::ENTITY })
    }

    /// Deserialize the entity from a JSON object.
    fn from_json(json: Value) -> Result<Self> {
        Ok(serde_json::from_value(json)?)
    }

    /// Serialize the entity to its wire form.
    ///
    /// Server-populated timestamps are not included.
    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
