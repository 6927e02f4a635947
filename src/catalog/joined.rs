//! Join-based resolution.
//!
//! The book/movie row shares its primary key with the owning item, so a
//! single left-joined query brings back everything. Which union variant a
//! row becomes is inferred from which relation came back non-null.

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{Book, Movie, SearchResult};
use crate::fallible::CatalogError;

/// One item with both possible relations. At most one of ``book_title`` and
/// ``movie_title`` is set for well-formed data.
#[derive(sqlx::FromRow, Debug)]
pub struct JoinedRow {
    pub id: Uuid,
    pub price: i32,
    pub amount: i32,
    pub book_title: Option<String>,
    pub serial_number: Option<i32>,
    pub movie_title: Option<String>,
    pub director: Option<String>,
}

pub async fn products(db: &Pool<Postgres>) -> Result<Vec<Option<SearchResult>>, CatalogError> {
    let rows = sqlx::query_as::<_, JoinedRow>(
        r#"
        SELECT i.id, i.price, i.amount,
               b.title AS book_title, b.serial_number,
               m.title AS movie_title, m.director
        FROM items i
        LEFT JOIN books b ON b.id = i.id
        LEFT JOIN movies m ON m.id = i.id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(resolve).collect())
}

/// Classifies a row by relation presence: book first, then movie, else
/// unresolved. An item without a specific record is a data-integrity
/// condition; it becomes a null entry without failing the rest of the batch.
pub fn resolve(row: JoinedRow) -> Option<SearchResult> {
    if let Some(title) = row.book_title {
        return Some(SearchResult::Book(Book {
            id: row.id.to_string(),
            title,
            serial_number: row.serial_number,
            price: row.price,
            amount: row.amount,
        }));
    }

    match (row.movie_title, row.director) {
        (Some(title), Some(director)) => Some(SearchResult::Movie(Movie {
            id: row.id.to_string(),
            title,
            director,
            price: row.price,
            amount: row.amount,
        })),
        _ => None,
    }
}
