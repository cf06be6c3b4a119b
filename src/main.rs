use std::sync::Arc;

use tonic::transport::Server;

use blogd::api::blog::BlogService;
use blogd::config::Config;
use blogd::db::client;
use blogd::db::repository::{BlogRepository, MongoBlogRepository};
use blogd::proto::blog_service_server::BlogServiceServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogd=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to MongoDB at {}", config.mongodb_uri);
    let mongo_client = client::connect(&config).await?;
    let database = mongo_client.database(&config.mongodb_database);
    let repo: Arc<dyn BlogRepository> =
        Arc::new(MongoBlogRepository::new(&database, &config.mongodb_collection));

    tracing::info!("Connected to MongoDB");

    let service = BlogService::new(repo);

    tracing::info!("Listening on {}", config.listen_addr);
    Server::builder()
        .add_service(BlogServiceServer::new(service))
        .serve_with_shutdown(config.listen_addr, shutdown_signal())
        .await?;

    tracing::info!("Closing MongoDB connection");
    mongo_client.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install interrupt handler");
    tracing::info!("Stopping the server...");
}
