//! Trait definitions for Insightly operations.
//!
//! Each entity type implements the traits its endpoints support. The
//! request logic lives in default methods driven by the endpoint table.

mod delete;
mod get;
mod list;
mod record;
mod save;
mod search;

pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use record::Record;
pub use save::Save;
pub use search::Search;
