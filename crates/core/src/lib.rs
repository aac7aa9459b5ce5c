//! bkt-core: bucket-scoped helpers over an S3-compatible object store
//!
//! This crate provides:
//! - [`Bucket`], a handle binding a store to one bucket name
//! - request options in [`option`], applied left to right per call
//! - the [`ObjectStore`] capability a bucket forwards to
//! - configuration, aliases and remote path parsing for the CLI
//!
//! It does not depend on any S3 SDK; `bkt-s3` provides the AWS-backed store.

pub mod alias;
pub mod bucket;
pub mod config;
pub mod error;
pub mod option;
pub mod path;
pub mod request;
pub mod response;
pub mod traits;

pub use alias::{Alias, AliasManager, BucketLookup, RetryConfig, TimeoutConfig};
pub use bucket::{Bucket, MAX_DELETE_OBJECTS, PendingGetObject, copy_source};
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use path::{RemotePath, parse_path};
pub use request::{
    CannedAcl, CopyObjectRequest, DeleteObjectRequest, DeleteObjectsRequest, GetObjectRequest,
    HeadObjectRequest, ListObjectVersionsRequest, ListObjectsRequest, ListObjectsV2Request,
    MetadataDirective, ObjectContent, ObjectIdentifier, PutObjectRequest, ServerSideEncryption,
};
pub use response::{
    CopyObjectOutput, DeleteMarker, DeleteObjectError, DeleteObjectOutput, DeleteObjectsOutput,
    DeletedObject, GetObjectOutput, ListObjectVersionsOutput, ListObjectsOutput,
    ListObjectsV2Output, ObjectBody, ObjectMetadata, ObjectSummary, ObjectVersion,
    PresignedRequest, PutObjectOutput,
};
pub use traits::{ObjectStore, PageHandler};
