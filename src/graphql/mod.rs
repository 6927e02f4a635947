use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema, SchemaBuilder};

use crate::catalog::{CatalogQueries, Item};

pub type GraphQLSchema = Schema<Queries, EmptyMutation, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct Queries(pub CatalogQueries);

/// The schema with everything registered that is not reachable from a query
/// field alone (the ``Item`` interface is only selected via ``... on Item``).
pub fn schema_builder() -> SchemaBuilder<Queries, EmptyMutation, EmptySubscription> {
    GraphQLSchema::build(Queries::default(), EmptyMutation, EmptySubscription)
        .register_type::<Item>()
}
