//! Failure modes of product resolution.
//!
//! These errors are not part of the GraphQL type system: ``products`` either
//! yields data or fails with a plain GraphQL error, so a [`thiserror`] enum
//! converted through its ``Display`` is all that is needed.

use thiserror::Error;
use uuid::Uuid;

use crate::catalog::ItemType;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// An item's ``owner_id`` points at a row that does not exist. This is a
    /// data-integrity condition, not a transient error; there is no retry.
    #[error("no {item_type} record found for owner id {owner_id}")]
    SpecificRecordMissing { item_type: ItemType, owner_id: Uuid },

    /// The stored discriminator names neither table.
    #[error("unknown item type {found:?}")]
    UnknownItemType { found: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
