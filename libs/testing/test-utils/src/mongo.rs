//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs a MongoDB container for a test.

use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

const MONGO_PORT: u16 = 27017;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let uri = mongo.uri();
/// // Point a MongoConfig at `uri` and `mongo.database_name()`
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    uri: String,
    database_name: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container with a fresh database name.
    pub async fn new() -> Self {
        Self::with_database("devevent_test").await
    }

    pub async fn with_database(database_name: impl Into<String>) -> Self {
        let container = Mongo::default()
            .with_tag("7.0")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(MONGO_PORT)
            .await
            .expect("Failed to get MongoDB port");

        let uri = format!("mongodb://127.0.0.1:{host_port}");
        tracing::info!(port = host_port, "Test MongoDB ready (mongo 7.0)");

        Self {
            container,
            uri,
            database_name: database_name.into(),
        }
    }

    /// Connection string without a database path
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
