use actix_web::{guard, post, web, App, HttpResponse, HttpServer, Result};

use async_graphql::extensions::ApolloTracing;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_actix_web::Request;

use log::info;
use sqlx::{migrate, PgPool};

use catalog_server::config::{Config, Strategy};
use catalog_server::graphql::{self, GraphQLSchema};

const GRAPHQL_ENDPOINT: &str = "/graphql";
const GRAPHQL_PLAYGROUND_ENDPOINT: &str = "/playground";

#[post("/graphql")]
async fn execute_graphql(schema: web::Data<GraphQLSchema>, req: Request) -> HttpResponse {
    let response = schema.execute(req.into_inner()).await;
    HttpResponse::Ok()
        .content_type("application/json")
        .body(serde_json::to_string(&response).unwrap())
}

async fn getsdl(schema: web::Data<GraphQLSchema>) -> HttpResponse {
    HttpResponse::Ok().body(schema.sdl())
}

async fn playground() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(GraphQLPlaygroundConfig::new(
            GRAPHQL_ENDPOINT,
        ))))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    let config = Config::new();

    info!("Connecting to the database");
    let db: PgPool = PgPool::connect(&config.db_uri)
        .await
        .unwrap_or_else(|e| panic!("Can't connect to database: {}", e));

    info!("Running database migrations...");
    match config.strategy {
        Strategy::Joined => migrate!("./migrations/joined").run(&db).await,
        Strategy::Discriminated => migrate!("./migrations/discriminated").run(&db).await,
    }
    .expect("couldn't run database migrations");

    let schema = graphql::schema_builder()
        .extension(ApolloTracing)
        .data(db)
        .data(config.strategy)
        .finish();

    info!(
        "Starting http server on {} ({:?} strategy)",
        config.listen, config.strategy
    );

    HttpServer::new(move || {
        App::new()
            .data(schema.clone())
            .service(execute_graphql)
            .route("/graphql/sdl", web::get().to(getsdl))
            .service(
                web::resource(GRAPHQL_PLAYGROUND_ENDPOINT)
                    .guard(guard::Get())
                    .to(playground),
            )
    })
    .bind(config.listen)?
    .run()
    .await
}
