use std::net::SocketAddr;

use crate::error::AppError;

/// Runtime configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the gRPC endpoint binds to.
    pub listen_addr: SocketAddr,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub mongodb_collection: String,
}

impl Config {
    /// Build the configuration from the environment, falling back to
    /// local-development defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:50051".to_string());
        let listen_addr = listen_addr
            .parse()
            .map_err(|e| AppError::Config(format!("invalid LISTEN_ADDR '{listen_addr}': {e}")))?;

        Ok(Self {
            listen_addr,
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongodb_database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "blogdb".to_string()),
            mongodb_collection: std::env::var("MONGODB_COLLECTION")
                .unwrap_or_else(|_| "blogs".to_string()),
        })
    }
}
