use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};

use crate::db::ident;
use crate::db::models::BlogDocument;
use crate::db::repository::BlogRepository;
use crate::error::AppError;
use crate::proto::{
    Blog, CreateBlogRequest, CreateBlogResponse, DeleteBlogRequest, DeleteBlogResponse,
    ListBlogsRequest, ListBlogsResponse, ReadBlogRequest, ReadBlogResponse, UpdateBlogRequest,
    UpdateBlogResponse,
};

/// The blog record service: translates between the RPC contract and the
/// stored document shape, delegating persistence to the injected
/// repository.
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }
}

/// Single-record reads report a result that fails to decode as not-found
/// rather than unavailable.
fn decode_as_not_found(err: AppError) -> AppError {
    match err {
        AppError::Decode(msg) => AppError::NotFound(msg),
        other => other,
    }
}

#[tonic::async_trait]
impl crate::proto::blog_service_server::BlogService for BlogService {
    async fn create_blog(
        &self,
        request: Request<CreateBlogRequest>,
    ) -> Result<Response<CreateBlogResponse>, Status> {
        let blog = request
            .into_inner()
            .blog
            .ok_or_else(|| Status::invalid_argument("blog payload is required"))?;

        // Any client-supplied id is ignored; the store assigns a fresh key.
        let doc = BlogDocument::new(blog.author_id, blog.title, blog.content);
        let id = self.repo.insert(&doc).await?;

        Ok(Response::new(CreateBlogResponse {
            blog: Some(Blog {
                id: ident::encode(&id),
                author_id: doc.author_id,
                title: doc.title,
                content: doc.content,
            }),
        }))
    }

    async fn read_blog(
        &self,
        request: Request<ReadBlogRequest>,
    ) -> Result<Response<ReadBlogResponse>, Status> {
        let id = request.into_inner().id;
        let key = ident::decode(&id)?;

        let doc = self
            .repo
            .find_by_id(key)
            .await
            .map_err(decode_as_not_found)?
            .ok_or_else(|| AppError::NotFound(format!("no blog with id {id}")))?;

        let blog = doc.into_record().map_err(decode_as_not_found)?;
        Ok(Response::new(ReadBlogResponse { blog: Some(blog) }))
    }

    async fn update_blog(
        &self,
        request: Request<UpdateBlogRequest>,
    ) -> Result<Response<UpdateBlogResponse>, Status> {
        let Blog {
            id,
            author_id,
            title,
            content,
        } = request
            .into_inner()
            .blog
            .ok_or_else(|| Status::invalid_argument("blog payload is required"))?;
        let key = ident::decode(&id)?;

        // Full replacement of the three content fields as a unit.
        let replacement = BlogDocument::new(author_id, title, content);
        let updated = self
            .repo
            .replace_by_id(key, &replacement)
            .await
            .map_err(decode_as_not_found)?
            .ok_or_else(|| AppError::NotFound(format!("no blog with id {id}")))?;

        // The caller receives what was actually persisted.
        let blog = updated.into_record().map_err(decode_as_not_found)?;
        Ok(Response::new(UpdateBlogResponse { blog: Some(blog) }))
    }

    async fn delete_blog(
        &self,
        request: Request<DeleteBlogRequest>,
    ) -> Result<Response<DeleteBlogResponse>, Status> {
        let id = request.into_inner().id;
        let key = ident::decode(&id)?;

        // A unique-key delete removes at most one document, so the response
        // carries a flag instead of a count.
        let deleted = self.repo.delete_by_id(key).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("no blog with id {id}")).into());
        }

        Ok(Response::new(DeleteBlogResponse { success: true }))
    }

    type ListBlogsStream = ReceiverStream<Result<ListBlogsResponse, Status>>;

    async fn list_blogs(
        &self,
        _request: Request<ListBlogsRequest>,
    ) -> Result<Response<Self::ListBlogsStream>, Status> {
        let mut documents = self.repo.stream_all().await?;

        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            while let Some(next) = documents.next().await {
                let item = match next.and_then(BlogDocument::into_record) {
                    Ok(blog) => Ok(ListBlogsResponse { blog: Some(blog) }),
                    Err(e) => {
                        tracing::warn!("aborting blog enumeration: {e}");
                        Err(Status::from(e))
                    }
                };
                let failed = item.is_err();
                if tx.send(item).await.is_err() {
                    // Receiver dropped: the client went away. Stop producing;
                    // dropping the stream releases the cursor.
                    break;
                }
                if failed {
                    break;
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}
