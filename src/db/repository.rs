use async_trait::async_trait;
use bson::oid::ObjectId;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use mongodb::bson::doc;
use mongodb::options::{FindOneAndReplaceOptions, ReturnDocument};

use crate::db::models::BlogDocument;
use crate::error::AppError;

/// Repository trait for blog storage operations.
///
/// This trait allows stubbing the database layer in tests.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new document; the store assigns and returns its primary key.
    async fn insert(&self, doc: &BlogDocument) -> Result<ObjectId, AppError>;

    /// Fetch the single document with the given primary key.
    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogDocument>, AppError>;

    /// Atomically replace the content fields of the document with the given
    /// key and return the post-update document, or `None` if no document
    /// matched.
    async fn replace_by_id(
        &self,
        id: ObjectId,
        replacement: &BlogDocument,
    ) -> Result<Option<BlogDocument>, AppError>;

    /// Remove the document with the given key, returning how many documents
    /// were removed (0 or 1 for a unique key).
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError>;

    /// Open a cursor over the entire collection, in store-native order.
    ///
    /// The returned stream owns the cursor; dropping the stream releases it.
    async fn stream_all(&self) -> Result<BoxStream<'static, Result<BlogDocument, AppError>>, AppError>;
}

/// MongoDB implementation of the BlogRepository.
pub struct MongoBlogRepository {
    collection: mongodb::Collection<BlogDocument>,
}

impl MongoBlogRepository {
    pub fn new(db: &mongodb::Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }
}

/// Classify a driver error: a document that cannot be deserialized into
/// [`BlogDocument`] is a decode failure, everything else is a store failure.
fn map_mongo_err(err: mongodb::error::Error) -> AppError {
    match &*err.kind {
        mongodb::error::ErrorKind::BsonDeserialization(e) => AppError::Decode(e.to_string()),
        _ => AppError::Database(err.to_string()),
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn insert(&self, doc: &BlogDocument) -> Result<ObjectId, AppError> {
        let result = self
            .collection
            .insert_one(doc)
            .await
            .map_err(map_mongo_err)?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Database(format!(
                "store assigned a non-ObjectId key: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<BlogDocument>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_err)
    }

    async fn replace_by_id(
        &self,
        id: ObjectId,
        replacement: &BlogDocument,
    ) -> Result<Option<BlogDocument>, AppError> {
        // Return the post-update document, not the pre-update one.
        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_replace(doc! { "_id": id }, replacement)
            .with_options(options)
            .await
            .map_err(map_mongo_err)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(map_mongo_err)?;

        Ok(result.deleted_count)
    }

    async fn stream_all(
        &self,
    ) -> Result<BoxStream<'static, Result<BlogDocument, AppError>>, AppError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_mongo_err)?;

        Ok(cursor.map_err(map_mongo_err).boxed())
    }
}
