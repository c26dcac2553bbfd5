use serde::Deserialize;

/// Request body for creating an entry. Only `content` is read; an owner
/// supplied by the client is dropped during deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub content: String,
}
