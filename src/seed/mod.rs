//! Seed routine.
//!
//! Inserts exactly one book-backed and one movie-backed item, each pair in
//! its own transaction. Deliberately not idempotent: every run generates
//! fresh ids, so running it twice leaves four items behind.

use log::info;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::config::Strategy;

/// The fixed demo inventory with ids freshly drawn per invocation.
#[derive(Debug)]
pub struct SeedPlan {
    pub book: BookSeed,
    pub movie: MovieSeed,
}

#[derive(Debug)]
pub struct BookSeed {
    pub id: Uuid,
    pub title: &'static str,
    pub serial_number: i32,
    pub price: i32,
    pub amount: i32,
}

#[derive(Debug)]
pub struct MovieSeed {
    pub id: Uuid,
    pub title: &'static str,
    pub director: &'static str,
    pub price: i32,
    pub amount: i32,
}

impl SeedPlan {
    pub fn generate() -> Self {
        Self {
            book: BookSeed {
                id: Uuid::new_v4(),
                title: "Awesome Book",
                serial_number: 122_121_313,
                price: 15,
                amount: 20,
            },
            movie: MovieSeed {
                id: Uuid::new_v4(),
                title: "Awesome Book",
                director: "John Doe",
                price: 45,
                amount: 10,
            },
        }
    }
}

pub async fn run(db: &Pool<Postgres>, strategy: Strategy) -> Result<(), sqlx::Error> {
    let plan = SeedPlan::generate();
    info!("seeding book {} and movie {}", plan.book.id, plan.movie.id);
    match strategy {
        Strategy::Joined => seed_joined(db, &plan).await,
        Strategy::Discriminated => seed_discriminated(db, &plan).await,
    }
}

/// The specific row reuses the item's id.
async fn seed_joined(db: &Pool<Postgres>, plan: &SeedPlan) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;
    sqlx::query("INSERT INTO items (id, price, amount) VALUES ($1, $2, $3)")
        .bind(plan.book.id)
        .bind(plan.book.price)
        .bind(plan.book.amount)
        .execute(&mut tx)
        .await?;
    sqlx::query("INSERT INTO books (id, title, serial_number) VALUES ($1, $2, $3)")
        .bind(plan.book.id)
        .bind(plan.book.title)
        .bind(plan.book.serial_number)
        .execute(&mut tx)
        .await?;
    tx.commit().await?;

    let mut tx = db.begin().await?;
    sqlx::query("INSERT INTO items (id, price, amount) VALUES ($1, $2, $3)")
        .bind(plan.movie.id)
        .bind(plan.movie.price)
        .bind(plan.movie.amount)
        .execute(&mut tx)
        .await?;
    sqlx::query("INSERT INTO movies (id, title, director) VALUES ($1, $2, $3)")
        .bind(plan.movie.id)
        .bind(plan.movie.title)
        .bind(plan.movie.director)
        .execute(&mut tx)
        .await?;
    tx.commit().await
}

/// The item gets an id of its own; ``owner_id`` always points at the
/// specific row, never at the item itself.
async fn seed_discriminated(db: &Pool<Postgres>, plan: &SeedPlan) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;
    sqlx::query("INSERT INTO books (id, title, serial_number) VALUES ($1, $2, $3)")
        .bind(plan.book.id)
        .bind(plan.book.title)
        .bind(plan.book.serial_number)
        .execute(&mut tx)
        .await?;
    sqlx::query(
        "INSERT INTO items (id, item_type, owner_id, price, amount) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind("Book")
    .bind(plan.book.id)
    .bind(plan.book.price)
    .bind(plan.book.amount)
    .execute(&mut tx)
    .await?;
    tx.commit().await?;

    let mut tx = db.begin().await?;
    sqlx::query("INSERT INTO movies (id, title, director) VALUES ($1, $2, $3)")
        .bind(plan.movie.id)
        .bind(plan.movie.title)
        .bind(plan.movie.director)
        .execute(&mut tx)
        .await?;
    sqlx::query(
        "INSERT INTO items (id, item_type, owner_id, price, amount) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind("Movie")
    .bind(plan.movie.id)
    .bind(plan.movie.price)
    .bind(plan.movie.amount)
    .execute(&mut tx)
    .await?;
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_carries_the_demo_inventory() {
        let plan = SeedPlan::generate();

        assert_eq!(plan.book.title, "Awesome Book");
        assert_eq!(plan.book.serial_number, 122_121_313);
        assert_eq!(plan.book.price, 15);
        assert_eq!(plan.book.amount, 20);

        assert_eq!(plan.movie.title, "Awesome Book");
        assert_eq!(plan.movie.director, "John Doe");
        assert_eq!(plan.movie.price, 45);
        assert_eq!(plan.movie.amount, 10);

        assert_ne!(plan.book.id, plan.movie.id);
    }

    #[test]
    fn every_run_draws_fresh_ids() {
        let first = SeedPlan::generate();
        let second = SeedPlan::generate();

        // no dedup anywhere: a second run duplicates the inventory
        assert_ne!(first.book.id, second.book.id);
        assert_ne!(first.movie.id, second.movie.id);
    }
}
