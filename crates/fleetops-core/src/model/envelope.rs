//! Response envelope shapes.
//!
//! Most endpoints return bare JSON arrays/objects; a few (the certificate
//! listings) wrap the payload as `{ "value": [...], "Count": n }`. Callers
//! unwrap explicitly per endpoint and discard `Count`.

use serde::{Deserialize, Serialize};

/// `{ "value": [...], "Count": n }` list wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub value: Vec<T>,
    #[serde(rename = "Count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> ListEnvelope<T> {
    /// Unwrap to the inner list, discarding `Count`.
    pub fn into_inner(self) -> Vec<T> {
        self.value
    }
}

/// `{ "value": {...} }` single-record wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEnvelope<T> {
    pub value: T,
}

impl<T> ItemEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}
