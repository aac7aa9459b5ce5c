//! Request values
//!
//! One record per operation. A request is built fresh for every call with the
//! bucket and key (or prefix) already set, mutated in place by options and
//! then moved into the capability.

use std::collections::HashMap;
use std::path::PathBuf;

/// Server-side encryption mode for stored objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerSideEncryption {
    /// Keys managed by the storage provider (SSE-S3)
    Aes256,
    /// Keys managed by a key management service (SSE-KMS)
    AwsKms,
}

impl ServerSideEncryption {
    /// Wire value of this mode
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aes256 => "AES256",
            Self::AwsKms => "aws:kms",
        }
    }
}

/// Canned access control list applied to a written object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedAcl {
    Private,
    PublicRead,
}

impl CannedAcl {
    /// Wire value of this ACL
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
        }
    }
}

/// Whether a copy keeps the source metadata or takes it from the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataDirective {
    #[default]
    Copy,
    Replace,
}

impl MetadataDirective {
    /// Wire value of this directive
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::Replace => "REPLACE",
        }
    }
}

/// Content of an object to store
///
/// Both variants can be read more than once, so the transport is free to
/// re-send the body when it signs or retries a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectContent {
    /// In-memory bytes
    Bytes(Vec<u8>),
    /// A local file, opened by the transport when the request is sent
    File(PathBuf),
}

impl ObjectContent {
    /// Size of in-memory content; files are sized by the transport
    pub fn len_hint(&self) -> Option<u64> {
        match self {
            ObjectContent::Bytes(data) => Some(data.len() as u64),
            ObjectContent::File(_) => None,
        }
    }
}

impl From<Vec<u8>> for ObjectContent {
    fn from(data: Vec<u8>) -> Self {
        ObjectContent::Bytes(data)
    }
}

impl From<&[u8]> for ObjectContent {
    fn from(data: &[u8]) -> Self {
        ObjectContent::Bytes(data.to_vec())
    }
}

impl From<String> for ObjectContent {
    fn from(data: String) -> Self {
        ObjectContent::Bytes(data.into_bytes())
    }
}

impl From<PathBuf> for ObjectContent {
    fn from(path: PathBuf) -> Self {
        ObjectContent::File(path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetObjectRequest {
    pub bucket: String,
    pub key: String,
    pub version_id: Option<String>,
    /// Byte range, e.g. `bytes=0-1023`
    pub range: Option<String>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub part_number: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadObjectRequest {
    pub bucket: String,
    pub key: String,
    pub version_id: Option<String>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub part_number: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: String,
    pub body: ObjectContent,
    pub acl: Option<CannedAcl>,
    pub server_side_encryption: Option<ServerSideEncryption>,
    pub sse_kms_key_id: Option<String>,
    pub content_type: Option<String>,
    pub content_length: Option<i64>,
    pub cache_control: Option<String>,
    pub storage_class: Option<String>,
    /// User metadata, sent as `x-amz-meta-*` headers
    pub metadata: HashMap<String, String>,
}

impl PutObjectRequest {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, body: ObjectContent) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            body,
            acl: None,
            server_side_encryption: None,
            sse_kms_key_id: None,
            content_type: None,
            content_length: None,
            cache_control: None,
            storage_class: None,
            metadata: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteObjectRequest {
    pub bucket: String,
    pub key: String,
}

/// Key (and optionally version) of an object to delete in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifier {
    pub key: String,
    pub version_id: Option<String>,
}

impl ObjectIdentifier {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: None,
        }
    }

    pub fn with_version(key: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version_id: Some(version_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteObjectsRequest {
    pub bucket: String,
    pub objects: Vec<ObjectIdentifier>,
    /// Only report failures in the response
    pub quiet: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsRequest {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
    pub marker: Option<String>,
    pub max_keys: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsV2Request {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
    /// Page size
    pub max_keys: Option<i32>,
    pub start_after: Option<String>,
    pub fetch_owner: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectVersionsRequest {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
    /// Page size
    pub max_keys: Option<i32>,
    pub key_marker: Option<String>,
    pub version_id_marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyObjectRequest {
    pub bucket: String,
    pub key: String,
    /// `source-bucket/escaped-source-key`, optionally followed by `?versionId=`
    pub copy_source: String,
    pub metadata_directive: Option<MetadataDirective>,
    pub acl: Option<CannedAcl>,
    pub server_side_encryption: Option<ServerSideEncryption>,
    pub sse_kms_key_id: Option<String>,
    pub content_type: Option<String>,
    pub storage_class: Option<String>,
    pub metadata: HashMap<String, String>,
}
