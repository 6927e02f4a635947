//! Seeds the demo inventory: one book-backed item and one movie-backed item.
//! Not idempotent; every run inserts a fresh pair.

use anyhow::Context as _;
use log::{error, info};
use sqlx::{migrate, PgPool};

use catalog_server::config::{Config, Strategy};
use catalog_server::seed;

#[actix_web::main]
async fn main() {
    pretty_env_logger::init();

    info!("Start seeding ...");
    if let Err(e) = run().await {
        error!("seeding failed: {:#}", e);
        std::process::exit(1);
    }
    info!("done seeding ...");
}

async fn run() -> anyhow::Result<()> {
    let config = Config::new();

    let db: PgPool = PgPool::connect(&config.db_uri)
        .await
        .context("can't connect to database")?;

    match config.strategy {
        Strategy::Joined => migrate!("./migrations/joined").run(&db).await,
        Strategy::Discriminated => migrate!("./migrations/discriminated").run(&db).await,
    }
    .context("couldn't run database migrations")?;

    seed::run(&db, config.strategy)
        .await
        .context("seed transaction failed")?;
    Ok(())
}
