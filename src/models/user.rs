//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::endpoints::Resource;
use crate::models::timestamp;
use crate::traits::{List, Record};

/// A user of the Insightly account. Read-only through this API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub contact_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub timezone_id: Option<String>,
    pub user_currency: Option<String>,
    pub task_week_start: Option<i64>,
    pub contact_display: Option<String>,
    pub contact_order: Option<String>,
    pub email_dropbox_identifier: Option<String>,
    pub email_dropbox_address: Option<String>,
    pub instance_id: Option<i64>,
    pub administrator: Option<bool>,
    pub account_owner: Option<bool>,
    pub active: Option<bool>,

    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_updated_utc: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.administrator.unwrap_or(false)
    }
}

impl Record for User {
    const RESOURCE: Resource = Resource::Users;
    const ENTITY: &'static str = "User";

    fn id(&self) -> Option<i64> {
        self.user_id
    }
}

impl List for User {}
