//! Insightly API model types.

pub(crate) mod common;
mod contact;
pub(crate) mod custom_field;
pub(crate) mod link;
mod opportunity;
mod organisation;
mod relationship;
pub mod timestamp;
mod user;

pub use common::{Address, Tag, Visibility};
pub use contact::*;
pub use custom_field::CustomField;
pub use link::{
    ContactLink, Link, LinkTarget, LinkUpdate, OpportunityLink, OrganisationLink, PeerLinkUpdate,
};
pub use opportunity::*;
pub use organisation::*;
pub use relationship::*;
pub use user::*;
