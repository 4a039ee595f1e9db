//! Link records connecting resources to each other.
//!
//! Two families exist:
//!
//! - [`Link`]: an association between different resource types, such as a
//!   contact's role in an organisation or an opportunity.
//! - [`ContactLink`], [`OrganisationLink`], [`OpportunityLink`]: a typed
//!   relationship between two records of the same type, for example
//!   "Parent / Subsidiary". The `FIRST_*` side is the child and the
//!   `SECOND_*` side the parent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::InsightlyClient;
use crate::endpoints::{Operation, Resource, DEFAULT_RELATIONSHIP_ID};
use crate::error::Result;

/// Which resource a [`Link`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Contact,
    Organisation,
    Opportunity,
}

impl LinkTarget {
    /// Singular name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            LinkTarget::Contact => "Contact Link",
            LinkTarget::Organisation => "Organisation Link",
            LinkTarget::Opportunity => "Opportunity Link",
        }
    }

    fn set(self, link: &mut Link, id: i64) {
        match self {
            LinkTarget::Contact => link.contact_id = Some(id),
            LinkTarget::Organisation => link.organisation_id = Some(id),
            LinkTarget::Opportunity => link.opportunity_id = Some(id),
        }
    }
}

/// An association between two different resource types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_opportunity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Link {
    /// A new link from `owner` to `target`, not yet saved.
    pub(crate) fn between(
        owner: LinkTarget,
        owner_id: i64,
        target: LinkTarget,
        target_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Self {
        let mut link = Link {
            role,
            details,
            ..Default::default()
        };
        owner.set(&mut link, owner_id);
        target.set(&mut link, target_id);
        link
    }

    /// The ID of the linked record of the given type, if set.
    pub fn target_id(&self, target: LinkTarget) -> Option<i64> {
        match target {
            LinkTarget::Contact => self.contact_id,
            LinkTarget::Organisation => self.organisation_id,
            LinkTarget::Opportunity => self.opportunity_id,
        }
    }

    /// Apply an update over this link's current values.
    pub fn merged(&self, target: LinkTarget, update: LinkUpdate) -> Self {
        let mut link = self.clone();
        if let Some(id) = update.target_id {
            target.set(&mut link, id);
        }
        if update.role.is_some() {
            link.role = update.role;
        }
        if update.details.is_some() {
            link.details = update.details;
        }
        link
    }
}

/// New values for a [`Link`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkUpdate {
    /// The linked record (organisation, opportunity or contact).
    pub target_id: Option<i64>,
    pub role: Option<String>,
    pub details: Option<String>,
}

/// New values for a same-type link. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerLinkUpdate {
    pub parent_id: Option<i64>,
    pub child_id: Option<i64>,
    pub relationship_id: Option<i64>,
    pub details: Option<String>,
}

/// Generates a same-type link record.
macro_rules! peer_link {
    (
        $(#[$meta:meta])*
        $name:ident {
            id: $id:ident => $id_wire:literal,
            child: $child:ident,
            parent: $parent:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
        pub struct $name {
            #[serde(rename = $id_wire, skip_serializing_if = "Option::is_none")]
            pub $id: Option<i64>,
            /// The child side of the relationship.
            pub $child: Option<i64>,
            /// The parent side of the relationship.
            pub $parent: Option<i64>,
            pub relationship_id: Option<i64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub details: Option<String>,
        }

        impl $name {
            /// A new link, not yet saved. `relationship_id` defaults to
            /// "Parent / Subsidiary".
            pub fn new(
                parent_id: i64,
                child_id: i64,
                relationship_id: Option<i64>,
                details: Option<String>,
            ) -> Self {
                Self {
                    $id: None,
                    $child: Some(child_id),
                    $parent: Some(parent_id),
                    relationship_id: Some(relationship_id.unwrap_or(DEFAULT_RELATIONSHIP_ID)),
                    details,
                }
            }

            /// Apply an update over this link's current values.
            pub fn merged(&self, update: PeerLinkUpdate) -> Self {
                let mut link = self.clone();
                if update.parent_id.is_some() {
                    link.$parent = update.parent_id;
                }
                if update.child_id.is_some() {
                    link.$child = update.child_id;
                }
                if update.relationship_id.is_some() {
                    link.relationship_id = update.relationship_id;
                }
                if update.details.is_some() {
                    link.details = update.details;
                }
                link
            }
        }
    };
}

peer_link! {
    /// A typed relationship between two contacts.
    ContactLink {
        id: contact_link_id => "CONTACT_LINK_ID",
        child: first_contact_id,
        parent: second_contact_id,
    }
}

peer_link! {
    /// A typed relationship between two organisations.
    OrganisationLink {
        id: org_link_id => "ORG_LINK_ID",
        child: first_organisation_id,
        parent: second_organisation_id,
    }
}

peer_link! {
    /// A typed relationship between two opportunities.
    OpportunityLink {
        id: opportunity_link_id => "OPPORTUNITY_LINK_ID",
        child: first_opportunity_id,
        parent: second_opportunity_id,
    }
}

/// Send a link to one of a record's link endpoints and decode the reply.
pub(crate) async fn send_link<L>(
    client: &InsightlyClient,
    resource: Resource,
    operation: Operation,
    parent_id: i64,
    link: &L,
) -> Result<L>
where
    L: Serialize + DeserializeOwned + Sync,
{
    let endpoint = resource.endpoint(operation)?;
    let path = endpoint.path_for(parent_id);
    let response = client.send_json(endpoint.method, &path, link).await?;
    response.into_json()
}

/// Replace the first item matching `same`, or append.
pub(crate) fn replace_or_push<L>(items: &mut Vec<L>, item: L, same: impl Fn(&L) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}
