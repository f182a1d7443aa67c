use std::sync::Arc;

use mongodb::{bson::doc, Client, Database};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Shared handle to the document store. Cloning is cheap; every clone sees
/// the same lazily-established client.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    uri: String,
    database: String,
    client: OnceCell<Client>,
}

impl Store {
    /// Records connection parameters without touching the network. The actual
    /// connection is made on the first call to [`Store::handle`].
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                uri: config.mongodb_uri.clone(),
                database: config.database.clone(),
                client: OnceCell::new(),
            }),
        }
    }

    /// Returns the live database handle, connecting on first use. Concurrent
    /// callers share a single in-flight connection attempt; once a client
    /// exists it is reused for the life of the process.
    pub async fn handle(&self) -> Result<Database, ApiError> {
        let client = match self.inner.client.get() {
            Some(client) => {
                debug!("store already connected");
                client
            }
            None => self.inner.client.get_or_try_init(|| self.connect()).await?,
        };
        Ok(client.database(&self.inner.database))
    }

    async fn connect(&self) -> Result<Client, ApiError> {
        let client = Client::with_uri_str(&self.inner.uri)
            .await
            .map_err(ApiError::Connection)?;

        // The driver connects lazily; ping so an unreachable store surfaces
        // here instead of on the first collection operation.
        client
            .database(&self.inner.database)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(ApiError::Connection)?;

        info!(database = %self.inner.database, "connected to store");
        Ok(client)
    }

    /// Teardown hook for process shutdown. No-op if the store was never used.
    pub async fn shutdown(&self) {
        if let Some(client) = self.inner.client.get() {
            client.clone().shutdown().await;
            info!("store connection closed");
        }
    }
}
