use std::sync::Arc;

use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};

use blogd::api::blog::BlogService;
use blogd::db::repository::{BlogRepository, MongoBlogRepository};
use blogd::proto::blog_service_client::BlogServiceClient;
use blogd::proto::blog_service_server::BlogServiceServer;
use blogd::proto::{Blog, CreateBlogRequest};

const COLLECTION: &str = "blogs";

/// Holds the running MongoDB container and a client connected to a real
/// gRPC server on an ephemeral port.
///
/// The container is kept alive for as long as this struct lives. When
/// dropped, it is stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub client: BlogServiceClient<Channel>,
    pub database: mongodb::Database,
}

impl TestEnv {
    /// Spin up MongoDB, serve the blog service against it, and connect.
    pub async fn start() -> Self {
        let mongo = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");
        let mongo_port = mongo
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let database = mongo_client.database("blogd_test");
        let repo: Arc<dyn BlogRepository> =
            Arc::new(MongoBlogRepository::new(&database, COLLECTION));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            Server::builder()
                .add_service(BlogServiceServer::new(BlogService::new(repo)))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("gRPC server failed");
        });

        let client = BlogServiceClient::connect(format!("http://{}", addr))
            .await
            .expect("Failed to connect to blog service");

        Self {
            _mongo: mongo,
            client,
            database,
        }
    }

    /// Helper: create a blog record and return the server's response record.
    pub async fn create(&self, author_id: &str, title: &str, content: &str) -> Blog {
        let mut client = self.client.clone();
        client
            .create_blog(CreateBlogRequest {
                blog: Some(Blog {
                    id: String::new(),
                    author_id: author_id.to_string(),
                    title: title.to_string(),
                    content: content.to_string(),
                }),
            })
            .await
            .expect("CreateBlog failed")
            .into_inner()
            .blog
            .expect("CreateBlog response missing blog")
    }

    /// The raw collection, for planting documents the typed layer would
    /// never produce.
    pub fn raw_collection(&self) -> mongodb::Collection<mongodb::bson::Document> {
        self.database.collection(COLLECTION)
    }
}
