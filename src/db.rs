use mongodb::{bson::doc, Client, Database};
use tracing::info;

use crate::{config::Config, errors::Result};

/// The process-wide MongoDB client together with the selected database.
///
/// Opened once in `main` and handed to the store; the driver pools
/// connections internally.
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Creates the client and pings the database so that a wrong URI or an
    /// unreachable server is reported at startup.
    pub async fn open(config: &Config) -> Result<Connection> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client.database(&config.database_name);
        database.run_command(doc! { "ping": 1 }, None).await?;
        info!("Connected to MongoDB database {}", config.database_name);

        Ok(Connection { client, database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub async fn close(self) {
        self.client.shutdown().await;
        info!("MongoDB client shut down");
    }
}
