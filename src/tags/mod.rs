//! Tag system — global catalog, persona assignments, usage counting, and
//! garbage collection of orphaned tags.
//!
//! Tags exist in the catalog before they can be assigned, and leave it only
//! through an explicit delete or a garbage-collection pass once their usage
//! count reaches zero.

pub mod store;
pub mod types;

pub use store::TagStore;
pub use types::{PersonaId, Tag, TagId, TagSettings};
