//! Opportunity and opportunity category models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::client::InsightlyClient;
use crate::endpoints::{Operation, Resource};
use crate::error::{InsightlyError, Result};
use crate::models::common::{Tag, Visibility};
use crate::models::custom_field::{self, CustomField};
use crate::models::link::{replace_or_push, send_link, Link, LinkTarget, LinkUpdate, OpportunityLink};
use crate::models::timestamp;
use crate::traits::{Delete, Get, List, Record, Save, Search};

/// Lifecycle state of an opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpportunityState {
    Open,
    Won,
    Lost,
    Suspended,
    Abandoned,
    #[serde(untagged)]
    Other(String),
}

/// An Insightly opportunity (a potential sale).
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Opportunity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_id: Option<i64>,
    pub opportunity_name: Option<String>,
    pub opportunity_details: Option<String>,
    pub organisation_id: Option<i64>,
    pub owner_user_id: Option<i64>,
    pub responsible_user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,

    pub probability: Option<i64>,
    pub bid_currency: Option<String>,
    pub bid_amount: Option<f64>,
    pub bid_type: Option<String>,
    pub bid_duration: Option<i64>,
    pub opportunity_value: Option<f64>,

    pub forecast_close_date: Option<String>,
    pub actual_close_date: Option<String>,

    pub opportunity_state: Option<OpportunityState>,
    pub opportunity_state_reason_id: Option<i64>,
    pub pipeline_id: Option<i64>,
    pub stage_id: Option<i64>,

    pub visible_to: Option<Visibility>,
    pub visible_team_id: Option<i64>,
    pub visible_user_ids: Option<String>,
    pub can_edit: Option<bool>,
    pub can_delete: Option<bool>,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "CUSTOMFIELDS")]
    pub custom_fields: Vec<CustomField>,
    #[serde_as(as = "DefaultOnNull")]
    pub tags: Vec<Tag>,
    #[serde_as(as = "DefaultOnNull")]
    pub links: Vec<Link>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "OPPORTUNITYLINKS")]
    pub opportunity_links: Vec<OpportunityLink>,

    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_created_utc: Option<DateTime<Utc>>,
    #[serde(skip_serializing, deserialize_with = "timestamp::deserialize_optional")]
    pub date_updated_utc: Option<DateTime<Utc>>,
}

impl Opportunity {
    /// A new, unsaved opportunity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            opportunity_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn custom_field(&self, id: &str) -> Option<&CustomField> {
        custom_field::find(&self.custom_fields, id)
    }

    pub fn set_custom_field(&mut self, id: &str, value: impl Into<Value>) {
        custom_field::upsert(&mut self.custom_fields, id, value.into());
    }

    pub fn link(&self, link_id: i64) -> Option<&Link> {
        self.links.iter().find(|l| l.link_id == Some(link_id))
    }

    /// Link a contact to this opportunity.
    pub async fn add_contact_link(
        &mut self,
        client: &InsightlyClient,
        contact_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        self.add_link(client, LinkTarget::Contact, contact_id, role, details)
            .await
    }

    /// Change a cached contact link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Opportunity::links`] as a contact link.
    pub async fn update_contact_link(
        &mut self,
        client: &InsightlyClient,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        self.update_link(client, LinkTarget::Contact, link_id, update)
            .await
    }

    /// Link an organisation to this opportunity.
    pub async fn add_organisation_link(
        &mut self,
        client: &InsightlyClient,
        organisation_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        self.add_link(client, LinkTarget::Organisation, organisation_id, role, details)
            .await
    }

    /// Change a cached organisation link.
    ///
    /// # Errors
    ///
    /// Returns [`InsightlyError::DoesNotExist`] if the link is not in
    /// [`Opportunity::links`] as an organisation link.
    pub async fn update_organisation_link(
        &mut self,
        client: &InsightlyClient,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        self.update_link(client, LinkTarget::Organisation, link_id, update)
            .await
    }

    async fn add_link(
        &mut self,
        client: &InsightlyClient,
        target: LinkTarget,
        target_id: i64,
        role: Option<String>,
        details: Option<String>,
    ) -> Result<Link> {
        let id = self.require_id()?;
        let link = Link::between(LinkTarget::Opportunity, id, target, target_id, role, details);

        let saved =
            send_link(client, Resource::Opportunities, Operation::AddLink, id, &link).await?;
        self.links.push(saved.clone());
        Ok(saved)
    }

    async fn update_link(
        &mut self,
        client: &InsightlyClient,
        target: LinkTarget,
        link_id: i64,
        update: LinkUpdate,
    ) -> Result<Link> {
        let id = self.require_id()?;
        let link = self
            .link(link_id)
            .filter(|l| l.target_id(target).is_some())
            .ok_or(InsightlyError::DoesNotExist {
                entity: target.name(),
                id: link_id,
            })?
            .merged(target, update);

        let saved =
            send_link(client, Resource::Opportunities, Operation::UpdateLink, id, &link).await?;
        replace_or_push(&mut self.links, saved.clone(), |l| l.link_id == Some(link_id));
        Ok(saved)
    }
}

impl Record for Opportunity {
    const RESOURCE: Resource = Resource::Opportunities;
    const ENTITY: &'static str = "Opportunity";

    fn id(&self) -> Option<i64> {
        self.opportunity_id
    }
}

impl Get for Opportunity {}
impl List for Opportunity {}
impl Search for Opportunity {}
impl Delete for Opportunity {}
impl Save for Opportunity {}

/// A category used to group opportunities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct OpportunityCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub active: Option<bool>,
    /// Display colour as a hex string, e.g. `019FDE`.
    pub background_color: Option<String>,
}

impl Record for OpportunityCategory {
    const RESOURCE: Resource = Resource::OpportunityCategories;
    const ENTITY: &'static str = "Opportunity Category";

    fn id(&self) -> Option<i64> {
        self.category_id
    }
}

impl List for OpportunityCategory {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_opportunity() {
        let opp = Opportunity::from_json(json!({
            "OPPORTUNITY_ID": 8,
            "OPPORTUNITY_NAME": "Big deal",
            "BID_AMOUNT": 1500.5,
            "BID_CURRENCY": "USD",
            "PROBABILITY": 40,
            "OPPORTUNITY_STATE": "OPEN",
            "CUSTOMFIELDS": [{"CUSTOM_FIELD_ID": "SOURCE__c", "FIELD_VALUE": "referral"}],
            "LINKS": [{"LINK_ID": 4, "OPPORTUNITY_ID": 8, "ORGANISATION_ID": 100}],
            "DATE_UPDATED_UTC": "2024-02-02 02:02:02"
        }))
        .unwrap();

        assert_eq!(opp.id(), Some(8));
        assert_eq!(opp.bid_amount, Some(1500.5));
        assert_eq!(opp.opportunity_state, Some(OpportunityState::Open));
        assert_eq!(opp.custom_field("SOURCE__c").unwrap().as_str(), Some("referral"));
        assert!(opp.custom_field("MISSING__c").is_none());
        assert!(opp.opportunity_links.is_empty());
        assert_eq!(opp.link(4).unwrap().organisation_id, Some(100));
        assert!(opp.date_updated_utc.is_some());
    }

    #[test]
    fn test_unknown_state_is_preserved() {
        let opp = Opportunity::from_json(json!({"OPPORTUNITY_STATE": "PAUSED"})).unwrap();
        assert_eq!(
            opp.opportunity_state,
            Some(OpportunityState::Other("PAUSED".to_string()))
        );
        assert_eq!(opp.to_json().unwrap()["OPPORTUNITY_STATE"], "PAUSED");
    }

    #[test]
    fn test_deserialize_category() {
        let category = OpportunityCategory::from_json(json!({
            "CATEGORY_ID": 2,
            "CATEGORY_NAME": "Hardware",
            "ACTIVE": true,
            "BACKGROUND_COLOR": "019FDE"
        }))
        .unwrap();

        assert_eq!(category.id(), Some(2));
        assert_eq!(category.category_name.as_deref(), Some("Hardware"));
        assert_eq!(category.active, Some(true));
    }

    #[test]
    fn test_null_collections_deserialize_as_empty() {
        let opp = Opportunity::from_json(json!({
            "OPPORTUNITY_ID": 8,
            "CUSTOMFIELDS": null,
            "TAGS": null,
            "LINKS": null,
            "OPPORTUNITYLINKS": null
        }))
        .unwrap();

        assert_eq!(opp.id(), Some(8));
        assert!(opp.custom_fields.is_empty());
        assert!(opp.tags.is_empty());
        assert!(opp.links.is_empty());
        assert!(opp.opportunity_links.is_empty());
    }
}
