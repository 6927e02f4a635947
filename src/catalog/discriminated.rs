//! Discriminator-based resolution.
//!
//! Generic items are fetched without a join; each item's ``item_type`` picks
//! the table its ``owner_id`` points into and a secondary lookup retrieves
//! the specific row. That is one extra round-trip per item, acceptable only
//! at demo scale. The lookups are all issued at once and joined, which also
//! means a single dangling item fails the whole query.

use futures::future::try_join_all;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{Book, ItemType, Movie, SearchResult};
use crate::fallible::CatalogError;

#[derive(sqlx::FromRow, Debug)]
pub struct ItemRow {
    pub id: Uuid,
    pub item_type: String,
    pub owner_id: Uuid,
    pub price: i32,
    pub amount: i32,
}

#[derive(sqlx::FromRow, Debug)]
pub struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub serial_number: Option<i32>,
}

#[derive(sqlx::FromRow, Debug)]
pub struct MovieRow {
    pub id: Uuid,
    pub title: String,
    pub director: String,
}

#[derive(Debug)]
pub enum Specific {
    Book(BookRow),
    Movie(MovieRow),
}

pub async fn products(db: &Pool<Postgres>) -> Result<Vec<SearchResult>, CatalogError> {
    let items = sqlx::query_as::<_, ItemRow>(
        "SELECT id, item_type, owner_id, price, amount FROM items",
    )
    .fetch_all(db)
    .await?;

    // one lookup per item, all outstanding at once
    try_join_all(items.into_iter().map(|item| resolve_item(db, item))).await
}

async fn resolve_item(db: &Pool<Postgres>, item: ItemRow) -> Result<SearchResult, CatalogError> {
    let item_type = ItemType::parse(&item.item_type)?;
    let specific = fetch_specific(db, item_type, item.owner_id).await?;
    Ok(merge(&item, specific))
}

async fn fetch_specific(
    db: &Pool<Postgres>,
    item_type: ItemType,
    owner_id: Uuid,
) -> Result<Specific, CatalogError> {
    let specific = match item_type {
        ItemType::Book => {
            sqlx::query_as::<_, BookRow>("SELECT id, title, serial_number FROM books WHERE id = $1")
                .bind(owner_id)
                .fetch_optional(db)
                .await?
                .map(Specific::Book)
        }
        ItemType::Movie => {
            sqlx::query_as::<_, MovieRow>("SELECT id, title, director FROM movies WHERE id = $1")
                .bind(owner_id)
                .fetch_optional(db)
                .await?
                .map(Specific::Movie)
        }
    };
    require_found(specific, item_type, owner_id)
}

/// First-or-throw: an ``owner_id`` without a row behind it fails resolution
/// for the whole batch, not just this item.
fn require_found(
    specific: Option<Specific>,
    item_type: ItemType,
    owner_id: Uuid,
) -> Result<Specific, CatalogError> {
    specific.ok_or(CatalogError::SpecificRecordMissing {
        item_type,
        owner_id,
    })
}

/// Merges the generic and the specific row into one output object. The
/// specific row's id wins; price and amount come from the item.
pub fn merge(item: &ItemRow, specific: Specific) -> SearchResult {
    match specific {
        Specific::Book(book) => SearchResult::Book(Book {
            id: book.id.to_string(),
            title: book.title,
            serial_number: book.serial_number,
            price: item.price,
            amount: item.amount,
        }),
        Specific::Movie(movie) => SearchResult::Movie(Movie {
            id: movie.id.to_string(),
            title: movie.title,
            director: movie.director,
            price: item.price,
            amount: item.amount,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_type: &str, owner_id: Uuid, price: i32, amount: i32) -> ItemRow {
        ItemRow {
            id: Uuid::new_v4(),
            item_type: item_type.to_string(),
            owner_id,
            price,
            amount,
        }
    }

    #[test]
    fn merge_takes_the_specific_rows_id() {
        let book = BookRow {
            id: Uuid::new_v4(),
            title: "Awesome Book".to_string(),
            serial_number: Some(122_121_313),
        };
        let generic = item("Book", book.id, 15, 20);
        let book_id = book.id.to_string();

        assert_eq!(
            merge(&generic, Specific::Book(book)),
            SearchResult::Book(Book {
                id: book_id,
                title: "Awesome Book".to_string(),
                serial_number: Some(122_121_313),
                price: 15,
                amount: 20,
            })
        );
    }

    #[test]
    fn merge_combines_movie_fields_with_item_fields() {
        let movie = MovieRow {
            id: Uuid::new_v4(),
            title: "Awesome Book".to_string(),
            director: "John Doe".to_string(),
        };
        let generic = item("Movie", movie.id, 45, 10);
        let movie_id = movie.id.to_string();

        assert_eq!(
            merge(&generic, Specific::Movie(movie)),
            SearchResult::Movie(Movie {
                id: movie_id,
                title: "Awesome Book".to_string(),
                director: "John Doe".to_string(),
                price: 45,
                amount: 10,
            })
        );
    }

    #[test]
    fn stored_discriminator_text_maps_to_its_variant() {
        assert_eq!(ItemType::parse("Book").unwrap(), ItemType::Book);
        assert_eq!(ItemType::parse("Movie").unwrap(), ItemType::Movie);
    }

    #[test]
    fn unknown_discriminator_is_rejected_with_the_offending_value() {
        let err = ItemType::parse("Album").unwrap_err();
        match &err {
            CatalogError::UnknownItemType { found } => assert_eq!(found, "Album"),
            other => panic!("expected UnknownItemType, got {:?}", other),
        }
        assert!(err.to_string().contains("Album"));
    }

    #[test]
    fn missing_specific_record_fails_the_lookup() {
        let owner_id = Uuid::new_v4();
        let err = require_found(None, ItemType::Movie, owner_id).unwrap_err();
        match err {
            CatalogError::SpecificRecordMissing {
                item_type,
                owner_id: reported,
            } => {
                assert_eq!(item_type, ItemType::Movie);
                assert_eq!(reported, owner_id);
            }
            other => panic!("expected SpecificRecordMissing, got {:?}", other),
        }
    }

    #[test]
    fn one_missing_record_aborts_the_whole_batch() {
        // mirrors the all-or-nothing join over the per-item lookups
        let good = require_found(
            Some(Specific::Book(BookRow {
                id: Uuid::new_v4(),
                title: "Awesome Book".to_string(),
                serial_number: None,
            })),
            ItemType::Book,
            Uuid::new_v4(),
        );
        let bad = require_found(None, ItemType::Movie, Uuid::new_v4());

        let batch: Result<Vec<Specific>, CatalogError> = vec![good, bad].into_iter().collect();
        assert!(matches!(
            batch,
            Err(CatalogError::SpecificRecordMissing { .. })
        ));
    }
}
