use mongodb::bson::doc;

use crate::config::Config;
use crate::error::AppError;

/// Connect to MongoDB and verify the connection with a ping.
pub async fn connect(config: &Config) -> Result<mongodb::Client, AppError> {
    let client = mongodb::Client::with_uri_str(&config.mongodb_uri)
        .await
        .map_err(|e| AppError::Database(format!("failed to connect to MongoDB: {e}")))?;

    client
        .database(&config.mongodb_database)
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::Database(format!("MongoDB ping failed: {e}")))?;

    Ok(client)
}
