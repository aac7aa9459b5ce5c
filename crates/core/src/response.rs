//! Response values returned by an [`ObjectStore`](crate::ObjectStore)

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

/// Streaming body of a retrieved object
///
/// The underlying connection is held until the body is dropped, so callers
/// must drop it on every exit path, including early abandonment.
pub type ObjectBody = Pin<Box<dyn AsyncRead + Send>>;

/// Metadata returned by head and get requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// ETag without surrounding quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sse_kms_key_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,

    pub delete_marker: bool,

    /// User metadata (`x-amz-meta-*`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// A retrieved object: metadata plus its body stream
pub struct GetObjectOutput {
    pub metadata: ObjectMetadata,
    pub body: ObjectBody,
    /// `Content-Range` of a ranged request
    pub content_range: Option<String>,
}

impl fmt::Debug for GetObjectOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetObjectOutput")
            .field("metadata", &self.metadata)
            .field("content_range", &self.content_range)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutObjectOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sse_kms_key_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteObjectOutput {
    pub delete_marker: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedObject {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    pub delete_marker: bool,
}

/// A key the service refused to delete within a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteObjectError {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a batch delete; per-key failures do not fail the call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteObjectsOutput {
    pub deleted: Vec<DeletedObject>,
    pub errors: Vec<DeleteObjectError>,
}

/// One entry of an object listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectSummary {
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size: Some(size),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListObjectsOutput {
    pub contents: Vec<ObjectSummary>,
    pub common_prefixes: Vec<String>,
    pub is_truncated: bool,

    /// Marker for the next request; only set when a delimiter was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_marker: Option<String>,
}

/// One page of a V2 listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListObjectsV2Output {
    pub contents: Vec<ObjectSummary>,
    pub common_prefixes: Vec<String>,
    pub key_count: i32,
    pub is_truncated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_continuation_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectVersion {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    pub is_latest: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMarker {
    pub key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    pub is_latest: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
}

/// One page of a version listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListObjectVersionsOutput {
    pub versions: Vec<ObjectVersion>,
    pub delete_markers: Vec<DeleteMarker>,
    pub common_prefixes: Vec<String>,
    pub is_truncated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key_marker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_version_id_marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyObjectOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy_source_version_id: Option<String>,
}

/// A signed request that can be sent later by any HTTP client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedRequest {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
}
