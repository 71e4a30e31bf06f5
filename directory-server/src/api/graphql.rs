//! GraphQL HTTP handlers

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::auth::Viewer;
use crate::core::ServerState;

/// Resolve the viewer from the bearer token, then execute.
/// A bad token never rejects the request; operations decide.
pub async fn graphql_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let viewer = Viewer::from_authorization(state.service.credentials(), authorization);

    state
        .schema
        .execute(req.into_inner().data(viewer))
        .await
        .into()
}

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
