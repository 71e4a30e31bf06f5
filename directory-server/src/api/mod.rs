//! HTTP routes
//!
//! - `POST /graphql` - GraphQL endpoint (bearer token optional)
//! - `GET /graphql` - GraphiQL, outside production
//! - `GET /health` - liveness

pub mod graphql;
pub mod health;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Create the application router
pub fn create_router(state: ServerState) -> Router {
    let mut graphql_route = post(graphql::graphql_handler);
    if state.graphiql {
        graphql_route = graphql_route.get(graphql::graphiql);
    }

    Router::new()
        .route("/graphql", graphql_route)
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
