//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::endpoints::DEFAULT_RELATIONSHIP_ID;
use crate::{
    Contact, ContactLink, Link, Opportunity, OpportunityCategory, OpportunityState, Organisation,
    OrganisationLink, Relationship, Tag, User, Visibility,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    pub const USER_ID: i64 = 1;
    pub const CONTACT_ID: i64 = 100;
    pub const ORGANISATION_ID: i64 = 200;
    pub const OPPORTUNITY_ID: i64 = 300;

    // =========================================================================
    // Contact Fixtures
    // =========================================================================

    /// A saved contact with only names and owner set.
    pub fn minimal_contact(id: i64, first_name: &str, last_name: &str) -> Contact {
        Contact {
            contact_id: Some(id),
            owner_user_id: Some(Self::USER_ID),
            ..Contact::new(first_name, last_name)
        }
    }

    /// A contact linked to an organisation, with a tag and a custom field.
    pub fn linked_contact(id: i64, organisation_id: i64) -> Contact {
        let mut contact = Self::minimal_contact(id, "Jane", "Doe");
        contact.email_address = Some("jane.doe@example.com".to_string());
        contact.visible_to = Some(Visibility::Everyone);
        contact.tags = vec![Tag::new("customer")];
        contact.set_custom_field("TIER__c", "gold");
        contact.links = vec![Link {
            link_id: Some(id * 10),
            contact_id: Some(id),
            organisation_id: Some(organisation_id),
            role: Some("Buyer".to_string()),
            ..Default::default()
        }];
        contact
    }

    // =========================================================================
    // Organisation Fixtures
    // =========================================================================

    pub fn minimal_organisation(id: i64, name: &str) -> Organisation {
        Organisation {
            organisation_id: Some(id),
            owner_user_id: Some(Self::USER_ID),
            ..Organisation::new(name)
        }
    }

    /// An organisation that is the parent of `child_id`.
    pub fn parent_organisation(id: i64, name: &str, child_id: i64) -> Organisation {
        let mut organisation = Self::minimal_organisation(id, name);
        organisation.organisation_links = vec![OrganisationLink {
            org_link_id: Some(id * 10),
            ..OrganisationLink::new(id, child_id, None, None)
        }];
        organisation
    }

    // =========================================================================
    // Opportunity Fixtures
    // =========================================================================

    pub fn open_opportunity(id: i64, name: &str, organisation_id: i64) -> Opportunity {
        Opportunity {
            opportunity_id: Some(id),
            owner_user_id: Some(Self::USER_ID),
            organisation_id: Some(organisation_id),
            opportunity_state: Some(OpportunityState::Open),
            bid_currency: Some("USD".to_string()),
            bid_amount: Some(25_000.0),
            probability: Some(50),
            ..Opportunity::new(name)
        }
    }

    pub fn category(id: i64, name: &str) -> OpportunityCategory {
        OpportunityCategory {
            category_id: Some(id),
            category_name: Some(name.to_string()),
            active: Some(true),
            background_color: Some("019FDE".to_string()),
        }
    }

    // =========================================================================
    // Account Fixtures
    // =========================================================================

    pub fn user(id: i64, first_name: &str, last_name: &str) -> User {
        User {
            user_id: Some(id),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email_address: Some(format!(
                "{}@example.com",
                first_name.to_lowercase()
            )),
            active: Some(true),
            administrator: Some(id == Self::USER_ID),
            ..Default::default()
        }
    }

    /// The built-in "Parent / Subsidiary" relationship.
    pub fn parent_relationship() -> Relationship {
        Relationship {
            relationship_id: Some(DEFAULT_RELATIONSHIP_ID),
            forward_title: Some("Parent".to_string()),
            forward: Some("is the parent of".to_string()),
            reverse_title: Some("Subsidiary".to_string()),
            reverse: Some("is a subsidiary of".to_string()),
            for_contacts: Some(true),
            for_organisations: Some(true),
        }
    }

    pub fn contact_link(id: i64, parent_id: i64, child_id: i64) -> ContactLink {
        ContactLink {
            contact_link_id: Some(id),
            ..ContactLink::new(parent_id, child_id, None, None)
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The data a freshly started [`MockServer`](super::MockServer) serves.
    pub fn default_scenario() -> DefaultScenario {
        let mut assistant = Self::minimal_contact(Self::CONTACT_ID + 1, "John", "Roe");
        assistant.contact_links = vec![Self::contact_link(
            Self::CONTACT_ID * 10 + 1,
            Self::CONTACT_ID,
            Self::CONTACT_ID + 1,
        )];

        DefaultScenario {
            contacts: vec![
                Self::linked_contact(Self::CONTACT_ID, Self::ORGANISATION_ID),
                assistant,
                Self::minimal_contact(Self::CONTACT_ID + 2, "Ada", "Lovelace"),
            ],
            organisations: vec![
                Self::parent_organisation(
                    Self::ORGANISATION_ID,
                    "Acme Holdings",
                    Self::ORGANISATION_ID + 1,
                ),
                Self::minimal_organisation(Self::ORGANISATION_ID + 1, "Acme Widgets"),
            ],
            opportunities: vec![Self::open_opportunity(
                Self::OPPORTUNITY_ID,
                "Widget renewal",
                Self::ORGANISATION_ID + 1,
            )],
            categories: vec![Self::category(1, "Hardware"), Self::category(2, "Services")],
            users: vec![
                Self::user(Self::USER_ID, "Alice", "Admin"),
                Self::user(Self::USER_ID + 1, "Bob", "Sales"),
            ],
            relationships: vec![Self::parent_relationship()],
        }
    }
}

/// A set of related records for seeding a mock server.
#[derive(Debug, Clone, Default)]
pub struct DefaultScenario {
    pub contacts: Vec<Contact>,
    pub organisations: Vec<Organisation>,
    pub opportunities: Vec<Opportunity>,
    pub categories: Vec<OpportunityCategory>,
    pub users: Vec<User>,
    pub relationships: Vec<Relationship>,
}
