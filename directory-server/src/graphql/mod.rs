//! GraphQL schema
//!
//! Resolvers are thin: they pull the [`Viewer`] and the [`DirectoryService`]
//! out of the context, call the service and turn any `AppError` into a
//! GraphQL error with `extensions { code, errorCode, category }`.

mod mutation;
mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};
use shared::error::AppResult;

use crate::auth::{Identity, Viewer};
use crate::directory::DirectoryService;

/// GraphQL schema type
pub type DirectorySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema around a directory service
pub fn build_schema(service: DirectoryService) -> DirectorySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// Export the schema as SDL
pub fn export_schema_sdl(schema: &DirectorySchema) -> String {
    schema.sdl()
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a DirectoryService> {
    ctx.data::<DirectoryService>()
}

/// Requests without `Viewer` data are anonymous
fn viewer<'a>(ctx: &Context<'a>) -> Option<&'a Identity> {
    ctx.data_opt::<Viewer>().and_then(Viewer::identity)
}

fn gql<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|e| e.extend())
}
