//! Relationship types used by contact and organisation links.

use serde::{Deserialize, Serialize};

use crate::endpoints::Resource;
use crate::traits::{List, Record};

/// A named relationship type, such as "Parent / Subsidiary".
///
/// `forward` and `reverse` describe the relationship from each side;
/// the titles are the human-readable labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Relationship {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<i64>,
    pub forward_title: Option<String>,
    pub forward: Option<String>,
    pub reverse_title: Option<String>,
    pub reverse: Option<String>,
    pub for_contacts: Option<bool>,
    pub for_organisations: Option<bool>,
}

impl Record for Relationship {
    const RESOURCE: Resource = Resource::Relationships;
    const ENTITY: &'static str = "Relationship";

    fn id(&self) -> Option<i64> {
        self.relationship_id
    }
}

impl List for Relationship {}
