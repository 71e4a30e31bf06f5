//! Server state shared by every handler

use std::sync::Arc;

use crate::auth::{CredentialService, JwtService};
use crate::core::{Config, Result};
use crate::db::{DirectoryStore, MemoryStore, PgStore};
use crate::directory::DirectoryService;
use crate::graphql::{DirectorySchema, build_schema};

#[derive(Clone)]
pub struct ServerState {
    pub service: DirectoryService,
    pub schema: DirectorySchema,
    /// GraphiQL is served only outside production
    pub graphiql: bool,
}

impl ServerState {
    /// Open the configured store and wire the service and schema around it
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn DirectoryStore> = match &config.database_url {
            Some(url) => {
                let store = PgStore::connect(url, config.db_max_connections).await?;
                tracing::info!("Connected to PostgreSQL, migrations applied");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: &Config, store: Arc<dyn DirectoryStore>) -> Self {
        let credentials = CredentialService::new(JwtService::with_config(config.jwt.clone()));
        let service = DirectoryService::new(
            store,
            credentials,
            config.listing.clone(),
            config.default_employee_password.clone(),
        );
        let schema = build_schema(service.clone());

        Self {
            service,
            schema,
            graphiql: !config.is_production(),
        }
    }
}
