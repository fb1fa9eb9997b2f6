use async_trait::async_trait;
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::{info, instrument};

use super::{DEFAULT_DATABASE, MongoConfig};
use crate::common::{ConnectionManager, Connector, DatabaseError, DatabaseResult};

/// Connection manager publishing a MongoDB [`Database`] handle.
pub type MongoConnectionManager = ConnectionManager<MongoConnector>;

/// Opens a MongoDB client, verifies it with a `ping`, then selects the database.
#[derive(Clone, Debug)]
pub struct MongoConnector {
    config: MongoConfig,
}

impl MongoConnector {
    pub fn new(config: MongoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = Database;
    type Error = DatabaseError;

    async fn connect(&self) -> DatabaseResult<Database> {
        let client = connect_from_config(&self.config).await?;
        let database = select_database(&client, &self.config);
        info!(database = database.name(), "Using MongoDB database");
        Ok(database)
    }
}

/// Build a client from `config` and confirm the deployment answers a `ping`.
///
/// The driver itself connects lazily, so without the ping an unreachable server would
/// only surface on the first query.
#[instrument(skip(config), fields(url = %config.redacted_url()))]
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Explicit name first, then the connection string's default, then [`DEFAULT_DATABASE`].
fn select_database(client: &Client, config: &MongoConfig) -> Database {
    match config.database.as_deref() {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    }
}
