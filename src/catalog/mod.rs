//! The product catalog.
//!
//! One query, ``products``, returning a list of the ``SearchResult`` union.
//! Two competing data models back it, selected by [`Strategy`]:
//!
//! * [`joined`] — the book/movie row shares its primary key with the owning
//!   item and both relations are left-joined in a single query. The output
//!   variant is inferred from which relation is present; an item with
//!   neither yields a null list entry but never fails its siblings.
//! * [`discriminated`] — the item stores an ``item_type`` discriminator and
//!   an ``owner_id`` into the specific table. One secondary lookup per item
//!   with first-or-throw semantics, so a single dangling item fails the
//!   whole query.

use std::fmt;

use async_graphql::{Context, Interface, Object, Result, SimpleObject, Union};
use sqlx::{Pool, Postgres};

use crate::{config::Strategy, fallible::CatalogError};

pub mod discriminated;
pub mod joined;

#[derive(SimpleObject, Debug, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// The serial number printed in the book, if it has one
    pub serial_number: Option<i32>,
    /// Price in the store's smallest currency unit
    pub price: i32,
    /// How many are in stock
    pub amount: i32,
}

#[derive(SimpleObject, Debug, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub director: String,
    /// Price in the store's smallest currency unit
    pub price: i32,
    /// How many are in stock
    pub amount: i32,
}

/// A product is exactly one of these shapes, decided at resolution time.
#[derive(Union, Debug, PartialEq)]
pub enum SearchResult {
    Book(Book),
    Movie(Movie),
}

#[derive(Interface)]
#[graphql(
    field(name = "id", type = "String"),
    field(
        name = "price",
        type = "&i32",
        desc = "Price in the store's smallest currency unit"
    ),
    field(name = "amount", type = "&i32", desc = "How many are in stock")
)]
/// The common fields every product kind carries. No query returns this
/// directly; clients reach it through ``... on Item`` selections, so it has
/// to be registered explicitly at schema build.
pub enum Item {
    Book(Book),
    Movie(Movie),
}

/// The stored discriminator of the discriminated data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Book,
    Movie,
}

impl ItemType {
    /// Parses the raw column value, rejecting anything that names neither
    /// specific table.
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        match raw {
            "Book" => Ok(ItemType::Book),
            "Movie" => Ok(ItemType::Movie),
            _ => Err(CatalogError::UnknownItemType {
                found: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemType::Book => "Book",
            ItemType::Movie => "Movie",
        })
    }
}

#[derive(Default)]
pub struct CatalogQueries;

#[Object]
/// The catalog query root
impl CatalogQueries {
    /// every product in the store, each one either a ``Book`` or a ``Movie``,
    /// in database iteration order
    pub async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Option<SearchResult>>> {
        let db = ctx.data::<Pool<Postgres>>()?;
        let products = match ctx.data::<Strategy>()? {
            Strategy::Joined => joined::products(db).await?,
            Strategy::Discriminated => discriminated::products(db)
                .await?
                .into_iter()
                .map(Some)
                .collect(),
        };
        Ok(products)
    }
}
