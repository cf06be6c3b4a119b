use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::db::ident;
use crate::error::AppError;
use crate::proto::Blog;

/// A blog record as stored in the collection.
///
/// `_id` is left unset on insertion so the store assigns it; documents
/// fetched back always carry one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl BlogDocument {
    /// Build a document for insertion or full replacement. The store keeps
    /// ownership of the primary key.
    pub fn new(author_id: String, title: String, content: String) -> Self {
        Self {
            id: None,
            author_id,
            title,
            content,
        }
    }

    /// Convert into the wire representation, rendering the primary key as
    /// its hex form. A stored document without `_id` cannot be represented
    /// on the wire and is reported as a decode failure.
    pub fn into_record(self) -> Result<Blog, AppError> {
        let id = self
            .id
            .ok_or_else(|| AppError::Decode("stored blog document has no _id".to_string()))?;
        Ok(Blog {
            id: ident::encode(&id),
            author_id: self.author_id,
            title: self.title,
            content: self.content,
        })
    }
}
