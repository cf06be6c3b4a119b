pub mod config;
pub mod error;
pub mod db {
    pub mod client;
    pub mod ident;
    pub mod models;
    pub mod repository;
}
pub mod api {
    pub mod blog;
    pub mod errors;
}

/// Generated protobuf types and service traits.
pub mod proto {
    tonic::include_proto!("blog.v1");
}
