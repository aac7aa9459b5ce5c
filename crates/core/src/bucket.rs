//! Bucket handle
//!
//! A [`Bucket`] binds an [`ObjectStore`] to one bucket name. Every method
//! builds the base request with the bucket and key (or prefix), applies the
//! given options left to right and forwards the request to the store. Errors
//! come back unchanged; only [`Bucket::object_exists`] interprets one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::option::{
    CopyObjectOption, GetObjectOption, HeadObjectOption, ListObjectVersionsOption,
    ListObjectsOption, ListObjectsV2Option, PutObjectOption, apply_all,
};
use crate::request::{
    CopyObjectRequest, DeleteObjectRequest, DeleteObjectsRequest, GetObjectRequest,
    HeadObjectRequest, ListObjectVersionsRequest, ListObjectsRequest, ListObjectsV2Request,
    ObjectContent, ObjectIdentifier, PutObjectRequest,
};
use crate::response::{
    CopyObjectOutput, DeleteObjectOutput, DeleteObjectsOutput, GetObjectOutput,
    ListObjectVersionsOutput, ListObjectsOutput, ListObjectsV2Output, ObjectBody,
    ObjectMetadata, PresignedRequest, PutObjectOutput,
};
use crate::traits::ObjectStore;

/// Most keys the service accepts in one batch delete
///
/// [`Bucket::delete_objects`] does not enforce this; larger batches are
/// rejected by the service.
pub const MAX_DELETE_OBJECTS: usize = 1000;

/// An S3 bucket bound to the store that serves it
#[derive(Clone)]
pub struct Bucket {
    store: Arc<dyn ObjectStore>,
    name: String,
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Bucket {
    /// Create a handle for bucket `name` served by `store`
    pub fn new(store: Arc<dyn ObjectStore>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// Bucket name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The store this handle forwards to
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    fn get_request(&self, key: &str, opts: Vec<GetObjectOption>) -> GetObjectRequest {
        let mut req = GetObjectRequest {
            bucket: self.name.clone(),
            key: key.to_string(),
            ..Default::default()
        };
        apply_all(&mut req, opts);
        req
    }

    fn head_request(&self, key: &str, opts: Vec<HeadObjectOption>) -> HeadObjectRequest {
        let mut req = HeadObjectRequest {
            bucket: self.name.clone(),
            key: key.to_string(),
            ..Default::default()
        };
        apply_all(&mut req, opts);
        req
    }

    /// Get an object with its metadata and body stream
    pub async fn get_object(
        &self,
        key: &str,
        opts: Vec<GetObjectOption>,
    ) -> Result<GetObjectOutput> {
        let req = self.get_request(key, opts);
        self.store.get_object(req).await
    }

    /// Get only the body stream of an object
    ///
    /// The caller owns the stream; dropping it releases the connection.
    pub async fn get_object_reader(
        &self,
        key: &str,
        opts: Vec<GetObjectOption>,
    ) -> Result<ObjectBody> {
        let output = self.get_object(key, opts).await?;
        Ok(output.body)
    }

    /// Build a get request without sending it
    ///
    /// The returned value can be inspected or adjusted, then sent or presigned.
    pub fn get_object_request(
        &self,
        key: &str,
        opts: Vec<GetObjectOption>,
    ) -> PendingGetObject<'_> {
        PendingGetObject {
            store: self.store.as_ref(),
            input: self.get_request(key, opts),
        }
    }

    /// Get the metadata of an object; a missing key is an error here
    pub async fn head_object(
        &self,
        key: &str,
        opts: Vec<HeadObjectOption>,
    ) -> Result<ObjectMetadata> {
        let req = self.head_request(key, opts);
        self.store.head_object(req).await
    }

    /// Check whether an object exists
    ///
    /// A failure with HTTP status 404 means `Ok(false)`. Every other failure,
    /// including ones that never reached the service, is returned as an error.
    pub async fn object_exists(&self, key: &str, opts: Vec<HeadObjectOption>) -> Result<bool> {
        match self.head_object(key, opts).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => {
                tracing::debug!(bucket = %self.name, key, "object does not exist");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Store an object
    ///
    /// `body` is replayable so the transport can re-send it when signing or
    /// retrying.
    pub async fn put_object(
        &self,
        key: &str,
        body: impl Into<ObjectContent>,
        opts: Vec<PutObjectOption>,
    ) -> Result<PutObjectOutput> {
        let mut req = PutObjectRequest::new(self.name.as_str(), key, body.into());
        apply_all(&mut req, opts);
        self.store.put_object(req).await
    }

    /// Delete a single object
    pub async fn delete_object(&self, key: &str) -> Result<DeleteObjectOutput> {
        let req = DeleteObjectRequest {
            bucket: self.name.clone(),
            key: key.to_string(),
        };
        self.store.delete_object(req).await
    }

    /// Delete several objects in one request
    ///
    /// At most [`MAX_DELETE_OBJECTS`] identifiers may be passed. An empty list
    /// is still sent.
    pub async fn delete_objects(
        &self,
        identifiers: Vec<ObjectIdentifier>,
    ) -> Result<DeleteObjectsOutput> {
        let req = DeleteObjectsRequest {
            bucket: self.name.clone(),
            objects: identifiers,
            quiet: false,
        };
        self.store.delete_objects(req).await
    }

    /// List one page of objects under `prefix`
    pub async fn list_objects(
        &self,
        prefix: &str,
        opts: Vec<ListObjectsOption>,
    ) -> Result<ListObjectsOutput> {
        let mut req = ListObjectsRequest {
            bucket: self.name.clone(),
            prefix: prefix.to_string(),
            ..Default::default()
        };
        apply_all(&mut req, opts);
        self.store.list_objects(req).await
    }

    /// Page through the objects under `prefix`
    ///
    /// `on_page` gets each page and whether it is the last; returning `false`
    /// stops paging. `cancel` aborts the listing between pages.
    pub async fn list_objects_v2_pages<F>(
        &self,
        cancel: &CancellationToken,
        prefix: &str,
        mut on_page: F,
        opts: Vec<ListObjectsV2Option>,
    ) -> Result<()>
    where
        F: FnMut(&ListObjectsV2Output, bool) -> bool + Send,
    {
        let mut req = ListObjectsV2Request {
            bucket: self.name.clone(),
            prefix: prefix.to_string(),
            ..Default::default()
        };
        apply_all(&mut req, opts);
        self.store
            .list_objects_v2_pages(cancel, req, &mut on_page)
            .await
    }

    /// Page through every version of the objects under `prefix`
    pub async fn list_object_versions_pages<F>(
        &self,
        cancel: &CancellationToken,
        prefix: &str,
        mut on_page: F,
        opts: Vec<ListObjectVersionsOption>,
    ) -> Result<()>
    where
        F: FnMut(&ListObjectVersionsOutput, bool) -> bool + Send,
    {
        let mut req = ListObjectVersionsRequest {
            bucket: self.name.clone(),
            prefix: prefix.to_string(),
            ..Default::default()
        };
        apply_all(&mut req, opts);
        self.store
            .list_object_versions_pages(cancel, req, &mut on_page)
            .await
    }

    /// Copy `src` to `dest` within this bucket
    pub async fn copy_object(
        &self,
        dest: &str,
        src: &str,
        opts: Vec<CopyObjectOption>,
    ) -> Result<CopyObjectOutput> {
        let mut req = CopyObjectRequest {
            bucket: self.name.clone(),
            key: dest.to_string(),
            copy_source: copy_source(&self.name, src),
            ..Default::default()
        };
        apply_all(&mut req, opts);
        self.store.copy_object(req).await
    }
}

/// Copy source header value for `key` in `bucket`
///
/// The key is query-escaped: spaces become `+` and everything except ASCII
/// alphanumerics and `-`, `_`, `.`, `~` is percent-encoded.
pub fn copy_source(bucket: &str, key: &str) -> String {
    let escaped: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
    // form encoding keeps `*` and escapes `~`; query escaping does the opposite
    let escaped = escaped.replace('*', "%2A").replace("%7E", "~");
    format!("{bucket}/{escaped}")
}

/// A get request that has been built but not sent
pub struct PendingGetObject<'a> {
    store: &'a dyn ObjectStore,
    input: GetObjectRequest,
}

impl fmt::Debug for PendingGetObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGetObject")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

impl PendingGetObject<'_> {
    /// The request as it will be sent
    pub fn input(&self) -> &GetObjectRequest {
        &self.input
    }

    /// Adjust the request before sending or presigning it
    pub fn input_mut(&mut self) -> &mut GetObjectRequest {
        &mut self.input
    }

    /// Take the request without sending it
    pub fn into_input(self) -> GetObjectRequest {
        self.input
    }

    /// Send the request
    pub async fn send(self) -> Result<GetObjectOutput> {
        self.store.get_object(self.input).await
    }

    /// Sign the request so it can be sent later by another client
    pub async fn presign(self, expires_in: Duration) -> Result<PresignedRequest> {
        self.store.presign_get_object(self.input, expires_in).await
    }
}
