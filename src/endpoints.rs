//! Endpoint table for the Insightly REST API.
//!
//! Maps each resource and operation to a path template and HTTP method,
//! and lists the fields each resource accepts on creation.

use std::fmt;

use reqwest::Method;

use crate::error::{InsightlyError, Result};

/// Default base URL template. `{version}` is replaced with the API version.
pub const DEFAULT_BASE_URL: &str = "https://api.insight.ly/v{version}/";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "2.3";

/// Page size for paginated `GetAll` endpoints.
pub const DEFAULT_TOP: u32 = 500;

/// Default relationship type for same-type links: "Parent / Subsidiary".
pub const DEFAULT_RELATIONSHIP_ID: i64 = 7;

/// A top-level Insightly resource collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Contacts,
    Organisations,
    Opportunities,
    OpportunityCategories,
    Users,
    Relationships,
}

/// An operation on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    GetAll,
    Search,
    Add,
    Update,
    Delete,
    AddLink,
    UpdateLink,
    AddContactLink,
    UpdateContactLink,
    AddOrganisationLink,
    UpdateOrganisationLink,
}

/// A single endpoint: path template, method and optional page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Path template relative to the base URL. May contain `{id}`.
    pub path: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Page size, for endpoints that paginate with `skip`/`top`.
    pub default_top: Option<u32>,
}

impl Endpoint {
    fn new(path: &'static str, method: Method) -> Self {
        Self {
            path,
            method,
            default_top: None,
        }
    }

    fn paged(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
            default_top: Some(DEFAULT_TOP),
        }
    }

    /// Render the path for a specific record.
    pub fn path_for(&self, id: i64) -> String {
        self.path.replace("{id}", &id.to_string())
    }
}

impl Resource {
    /// Every resource in the table.
    pub const ALL: [Resource; 6] = [
        Resource::Contacts,
        Resource::Organisations,
        Resource::Opportunities,
        Resource::OpportunityCategories,
        Resource::Users,
        Resource::Relationships,
    ];

    /// The collection name as it appears in URLs.
    pub const fn name(self) -> &'static str {
        match self {
            Resource::Contacts => "Contacts",
            Resource::Organisations => "Organisations",
            Resource::Opportunities => "Opportunities",
            Resource::OpportunityCategories => "OpportunityCategories",
            Resource::Users => "Users",
            Resource::Relationships => "Relationships",
        }
    }

    /// Look a resource up by its URL collection name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// The JSON field holding the record identifier.
    pub const fn id_field(self) -> &'static str {
        match self {
            Resource::Contacts => "CONTACT_ID",
            Resource::Organisations => "ORGANISATION_ID",
            Resource::Opportunities => "OPPORTUNITY_ID",
            Resource::OpportunityCategories => "CATEGORY_ID",
            Resource::Users => "USER_ID",
            Resource::Relationships => "RELATIONSHIP_ID",
        }
    }

    /// Look up the endpoint for an operation.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::Unsupported`] if the resource has no such
    /// endpoint.
    pub fn endpoint(self, operation: Operation) -> Result<Endpoint> {
        use Operation as Op;
        use Resource as R;

        let endpoint = match (self, operation) {
            (R::Contacts, Op::Get) => Endpoint::new("/Contacts/{id}", Method::GET),
            (R::Contacts, Op::GetAll) => Endpoint::paged("/Contacts"),
            (R::Contacts, Op::Search) => Endpoint::new("/Contacts/Search", Method::GET),
            (R::Contacts, Op::Add) => Endpoint::new("/Contacts", Method::POST),
            (R::Contacts, Op::Update) => Endpoint::new("/Contacts/{id}", Method::PUT),
            (R::Contacts, Op::Delete) => Endpoint::new("/Contacts/{id}", Method::DELETE),
            (R::Contacts, Op::AddLink) => Endpoint::new("/Contacts/{id}/Links", Method::POST),
            (R::Contacts, Op::UpdateLink) => Endpoint::new("/Contacts/{id}/Links", Method::PUT),
            (R::Contacts, Op::AddContactLink) => {
                Endpoint::new("/Contacts/{id}/ContactLinks", Method::POST)
            }
            (R::Contacts, Op::UpdateContactLink) => {
                Endpoint::new("/Contacts/{id}/ContactLinks", Method::PUT)
            }

            (R::Organisations, Op::Get) => Endpoint::new("/Organisations/{id}", Method::GET),
            (R::Organisations, Op::GetAll) => Endpoint::paged("/Organisations"),
            (R::Organisations, Op::Search) => {
                Endpoint::new("/Organisations/Search", Method::GET)
            }
            (R::Organisations, Op::Add) => Endpoint::new("/Organisations", Method::POST),
            (R::Organisations, Op::Update) => Endpoint::new("/Organisations/{id}", Method::PUT),
            (R::Organisations, Op::Delete) => {
                Endpoint::new("/Organisations/{id}", Method::DELETE)
            }
            (R::Organisations, Op::AddLink) => {
                Endpoint::new("/Organisations/{id}/Links", Method::POST)
            }
            (R::Organisations, Op::UpdateLink) => {
                Endpoint::new("/Organisations/{id}/Links", Method::PUT)
            }
            (R::Organisations, Op::AddOrganisationLink) => {
                Endpoint::new("/Organisations/{id}/OrganisationLinks", Method::POST)
            }
            (R::Organisations, Op::UpdateOrganisationLink) => {
                Endpoint::new("/Organisations/{id}/OrganisationLinks", Method::PUT)
            }

            (R::Opportunities, Op::Get) => Endpoint::new("/Opportunities/{id}", Method::GET),
            (R::Opportunities, Op::GetAll) => Endpoint::paged("/Opportunities"),
            (R::Opportunities, Op::Search) => {
                Endpoint::new("/Opportunities/Search", Method::GET)
            }
            (R::Opportunities, Op::Add) => Endpoint::new("/Opportunities", Method::POST),
            (R::Opportunities, Op::Update) => Endpoint::new("/Opportunities/{id}", Method::PUT),
            (R::Opportunities, Op::Delete) => {
                Endpoint::new("/Opportunities/{id}", Method::DELETE)
            }
            (R::Opportunities, Op::AddLink) => {
                Endpoint::new("/Opportunities/{id}/Links", Method::POST)
            }
            (R::Opportunities, Op::UpdateLink) => {
                Endpoint::new("/Opportunities/{id}/Links", Method::PUT)
            }

            (R::OpportunityCategories, Op::GetAll) => {
                Endpoint::paged("/OpportunityCategories")
            }
            (R::Users, Op::GetAll) => Endpoint::new("/Users", Method::GET),
            (R::Relationships, Op::GetAll) => Endpoint::new("/Relationships", Method::GET),

            _ => {
                return Err(InsightlyError::Unsupported {
                    resource: self.name(),
                    operation: operation.name(),
                })
            }
        };

        Ok(endpoint)
    }

    /// Fields accepted by the `Add` endpoint beyond the required ones.
    pub const fn accepted_fields(self) -> &'static [&'static str] {
        match self {
            Resource::Contacts => CONTACT_FIELDS,
            Resource::Organisations => ORGANISATION_FIELDS,
            Resource::Opportunities => OPPORTUNITY_FIELDS,
            _ => &[],
        }
    }

    /// Whether `field` is in the accepted-fields allow-list.
    pub fn accepts(self, field: &str) -> bool {
        self.accepted_fields().contains(&field)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    /// Operation name as used in the endpoint table.
    pub const fn name(self) -> &'static str {
        match self {
            Operation::Get => "Get",
            Operation::GetAll => "GetAll",
            Operation::Search => "Search",
            Operation::Add => "Add",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::AddLink => "AddLink",
            Operation::UpdateLink => "UpdateLink",
            Operation::AddContactLink => "AddContactLink",
            Operation::UpdateContactLink => "UpdateContactLink",
            Operation::AddOrganisationLink => "AddOrganisationLink",
            Operation::UpdateOrganisationLink => "UpdateOrganisationLink",
        }
    }
}

const CONTACT_FIELDS: &[&str] = &[
    "SALUTATION",
    "FIRST_NAME",
    "LAST_NAME",
    "BACKGROUND",
    "IMAGE_URL",
    "DEFAULT_LINKED_ORGANISATION",
    "ORGANISATION_ID",
    "OWNER_USER_ID",
    "VISIBLE_TO",
    "VISIBLE_TEAM_ID",
    "VISIBLE_USER_IDS",
    "CUSTOMFIELDS",
    "ADDRESS_MAIL_STREET",
    "ADDRESS_MAIL_CITY",
    "ADDRESS_MAIL_STATE",
    "ADDRESS_MAIL_POSTCODE",
    "ADDRESS_MAIL_COUNTRY",
    "ADDRESS_OTHER_STREET",
    "ADDRESS_OTHER_CITY",
    "ADDRESS_OTHER_STATE",
    "ADDRESS_OTHER_POSTCODE",
    "ADDRESS_OTHER_COUNTRY",
    "EMAIL_ADDRESS",
    "PHONE",
    "PHONE_HOME",
    "PHONE_MOBILE",
    "PHONE_OTHER",
    "PHONE_FAX",
    "PHONE_ASSISTANT",
    "ASSISTANT_NAME",
    "SOCIAL_LINKEDIN",
    "SOCIAL_FACEBOOK",
    "SOCIAL_TWITTER",
    "DATE_OF_BIRTH",
    "TITLE",
    "TAGS",
    "DATES",
    "LINKS",
    "CONTACTLINKS",
];

const ORGANISATION_FIELDS: &[&str] = &[
    "ORGANISATION_NAME",
    "BACKGROUND",
    "IMAGE_URL",
    "OWNER_USER_ID",
    "VISIBLE_TO",
    "VISIBLE_TEAM_ID",
    "VISIBLE_USER_IDS",
    "CUSTOMFIELDS",
    "ADDRESS_BILLING_STREET",
    "ADDRESS_BILLING_CITY",
    "ADDRESS_BILLING_STATE",
    "ADDRESS_BILLING_POSTCODE",
    "ADDRESS_BILLING_COUNTRY",
    "ADDRESS_SHIP_STREET",
    "ADDRESS_SHIP_CITY",
    "ADDRESS_SHIP_STATE",
    "ADDRESS_SHIP_POSTCODE",
    "ADDRESS_SHIP_COUNTRY",
    "PHONE",
    "PHONE_FAX",
    "WEBSITE",
    "SOCIAL_LINKEDIN",
    "SOCIAL_FACEBOOK",
    "SOCIAL_TWITTER",
    "EMAILDOMAINS",
    "TAGS",
    "DATES",
    "LINKS",
    "ORGANISATIONLINKS",
];

const OPPORTUNITY_FIELDS: &[&str] = &[
    "OPPORTUNITY_NAME",
    "OPPORTUNITY_DETAILS",
    "OPPORTUNITY_STATE",
    "OPPORTUNITY_STATE_REASON_ID",
    "OPPORTUNITY_VALUE",
    "PROBABILITY",
    "BID_CURRENCY",
    "BID_AMOUNT",
    "BID_TYPE",
    "BID_DURATION",
    "FORECAST_CLOSE_DATE",
    "ACTUAL_CLOSE_DATE",
    "CATEGORY_ID",
    "PIPELINE_ID",
    "STAGE_ID",
    "IMAGE_URL",
    "RESPONSIBLE_USER_ID",
    "OWNER_USER_ID",
    "ORGANISATION_ID",
    "VISIBLE_TO",
    "VISIBLE_TEAM_ID",
    "VISIBLE_USER_IDS",
    "CUSTOMFIELDS",
    "TAGS",
    "LINKS",
];
