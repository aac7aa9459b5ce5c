//! ObjectStore trait definition
//!
//! This trait is the capability a [`Bucket`](crate::Bucket) forwards to. It
//! keeps the bucket helpers decoupled from the SDK that talks to the service,
//! and lets tests substitute an in-memory double.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::request::{
    CopyObjectRequest, DeleteObjectRequest, DeleteObjectsRequest, GetObjectRequest,
    HeadObjectRequest, ListObjectVersionsRequest, ListObjectsRequest, ListObjectsV2Request,
    PutObjectRequest,
};
use crate::response::{
    CopyObjectOutput, DeleteObjectOutput, DeleteObjectsOutput, GetObjectOutput,
    ListObjectVersionsOutput, ListObjectsOutput, ListObjectsV2Output, ObjectMetadata,
    PresignedRequest, PutObjectOutput,
};

/// Page callback: receives each page and whether it is the last one, returns
/// `false` to stop paging
pub type PageHandler<'a, P> = &'a mut (dyn FnMut(&P, bool) -> bool + Send);

/// Operations of an S3-compatible storage service
///
/// Implementations own transport, authentication, retries and pagination.
/// Errors must carry the HTTP status whenever the service answered, so that
/// callers can tell a 404 apart from other failures.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Get an object with its body stream
    async fn get_object(&self, req: GetObjectRequest) -> Result<GetObjectOutput>;

    /// Sign a get request without sending it
    async fn presign_get_object(
        &self,
        req: GetObjectRequest,
        expires_in: Duration,
    ) -> Result<PresignedRequest>;

    /// Get object metadata
    async fn head_object(&self, req: HeadObjectRequest) -> Result<ObjectMetadata>;

    /// Store an object
    async fn put_object(&self, req: PutObjectRequest) -> Result<PutObjectOutput>;

    /// Delete a single object
    async fn delete_object(&self, req: DeleteObjectRequest) -> Result<DeleteObjectOutput>;

    /// Delete a batch of objects in one request
    async fn delete_objects(&self, req: DeleteObjectsRequest) -> Result<DeleteObjectsOutput>;

    /// Fetch one page of a V1 listing
    async fn list_objects(&self, req: ListObjectsRequest) -> Result<ListObjectsOutput>;

    /// Page through a V2 listing, calling `on_page` once per page in order
    ///
    /// Stops without fetching further pages once `on_page` returns `false`.
    /// Returns [`Error::Cancelled`](crate::Error::Cancelled) when `cancel`
    /// fires while a page is outstanding.
    async fn list_objects_v2_pages(
        &self,
        cancel: &CancellationToken,
        req: ListObjectsV2Request,
        on_page: PageHandler<'_, ListObjectsV2Output>,
    ) -> Result<()>;

    /// Page through all versions, with the same contract as
    /// [`list_objects_v2_pages`](Self::list_objects_v2_pages)
    async fn list_object_versions_pages(
        &self,
        cancel: &CancellationToken,
        req: ListObjectVersionsRequest,
        on_page: PageHandler<'_, ListObjectVersionsOutput>,
    ) -> Result<()>;

    /// Server-side copy
    async fn copy_object(&self, req: CopyObjectRequest) -> Result<CopyObjectOutput>;
}
