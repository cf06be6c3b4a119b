use bson::oid::ObjectId;

use crate::error::AppError;

/// Render a store-assigned primary key as its 24-character hex wire form.
pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// Parse the hex wire form back into a primary key.
///
/// Rejects anything that is not a syntactically valid ObjectId encoding
/// (wrong length, non-hex characters). Callers run this before any store
/// access, so malformed ids never reach the collection.
pub fn decode(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|e| AppError::InvalidId(format!("'{id}' is not a valid blog id: {e}")))
}
