//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from bkt-core.
//! Transport, signing, retries and pagination all stay inside the SDK.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    Delete, MetadataDirective, ObjectCannedAcl, ObjectIdentifier, ServerSideEncryption,
    StorageClass,
};
use tokio_util::sync::CancellationToken;

use bkt_core::{
    Alias, CopyObjectOutput, CopyObjectRequest, DeleteObjectOutput, DeleteObjectRequest,
    DeleteObjectsOutput, DeleteObjectsRequest, Error, GetObjectOutput, GetObjectRequest,
    HeadObjectRequest, ListObjectVersionsOutput, ListObjectVersionsRequest, ListObjectsOutput,
    ListObjectsRequest, ListObjectsV2Output, ListObjectsV2Request, ObjectContent,
    ObjectMetadata, ObjectStore, PageHandler, PresignedRequest, PutObjectOutput,
    PutObjectRequest, Result,
};

use crate::convert;
use crate::error::map_sdk_error;

/// S3 client wrapper
#[derive(Debug, Clone)]
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from an alias configuration
    pub async fn new(alias: &Alias) -> Result<Self> {
        alias.validate()?;

        let credentials = aws_credential_types::Credentials::new(
            alias.access_key.clone(),
            alias.secret_key.clone(),
            None, // session token
            None, // expiry
            "bkt-static-credentials",
        );

        let retry = alias.retry_config();
        let retry_config = aws_config::retry::RetryConfig::standard()
            .with_max_attempts(retry.max_attempts)
            .with_initial_backoff(Duration::from_millis(retry.initial_backoff_ms))
            .with_max_backoff(Duration::from_millis(retry.max_backoff_ms));

        let timeout = alias.timeout_config();
        let mut timeout_config = aws_config::timeout::TimeoutConfig::builder()
            .connect_timeout(Duration::from_millis(timeout.connect_ms))
            .read_timeout(Duration::from_millis(timeout.read_ms));
        if let Some(ms) = timeout.operation_ms {
            timeout_config = timeout_config.operation_timeout(Duration::from_millis(ms));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(alias.region.clone()))
            .retry_config(retry_config)
            .timeout_config(timeout_config.build());
        if let Some(endpoint) = &alias.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        let force_path_style = alias
            .bucket_lookup
            .force_path_style(alias.endpoint.is_some());
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(force_path_style)
            .build();

        tracing::debug!(
            alias = %alias.name,
            region = %alias.region,
            force_path_style,
            max_attempts = retry.max_attempts,
            "initialized S3 client"
        );

        Ok(Self::from_sdk(aws_sdk_s3::Client::from_conf(s3_config)))
    }

    /// Wrap an already configured SDK client
    pub fn from_sdk(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

async fn byte_stream(content: ObjectContent) -> Result<ByteStream> {
    match content {
        ObjectContent::Bytes(data) => Ok(ByteStream::from(data)),
        ObjectContent::File(path) => ByteStream::from_path(&path)
            .await
            .map_err(|e| Error::InvalidContent(format!("{}: {e}", path.display()))),
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn get_object(&self, req: GetObjectRequest) -> Result<GetObjectOutput> {
        tracing::debug!(bucket = %req.bucket, key = %req.key, "GetObject");

        let response = self
            .inner
            .get_object()
            .bucket(req.bucket)
            .key(req.key)
            .set_version_id(req.version_id)
            .set_range(req.range)
            .set_if_match(req.if_match)
            .set_if_none_match(req.if_none_match)
            .set_part_number(req.part_number)
            .send()
            .await
            .map_err(map_sdk_error)?;

        let metadata = convert::get_metadata(&response);
        let content_range = response.content_range().map(str::to_string);

        Ok(GetObjectOutput {
            metadata,
            body: Box::pin(response.body.into_async_read()),
            content_range,
        })
    }

    async fn presign_get_object(
        &self,
        req: GetObjectRequest,
        expires_in: Duration,
    ) -> Result<PresignedRequest> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| Error::Config(format!("Invalid presign expiry: {e}")))?;

        let presigned = self
            .inner
            .get_object()
            .bucket(req.bucket)
            .key(req.key)
            .set_version_id(req.version_id)
            .set_range(req.range)
            .set_if_match(req.if_match)
            .set_if_none_match(req.if_none_match)
            .set_part_number(req.part_number)
            .presigned(config)
            .await
            .map_err(map_sdk_error)?;

        Ok(PresignedRequest {
            method: presigned.method().to_string(),
            uri: presigned.uri().to_string(),
            headers: presigned
                .headers()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
    }

    async fn head_object(&self, req: HeadObjectRequest) -> Result<ObjectMetadata> {
        tracing::debug!(bucket = %req.bucket, key = %req.key, "HeadObject");

        let response = self
            .inner
            .head_object()
            .bucket(req.bucket)
            .key(req.key)
            .set_version_id(req.version_id)
            .set_if_match(req.if_match)
            .set_if_none_match(req.if_none_match)
            .set_part_number(req.part_number)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(convert::head_metadata(&response))
    }

    async fn put_object(&self, req: PutObjectRequest) -> Result<PutObjectOutput> {
        tracing::debug!(bucket = %req.bucket, key = %req.key, "PutObject");

        let body = byte_stream(req.body).await?;
        let metadata = (!req.metadata.is_empty()).then_some(req.metadata);

        let response = self
            .inner
            .put_object()
            .bucket(req.bucket)
            .key(req.key)
            .body(body)
            .set_acl(req.acl.map(|acl| ObjectCannedAcl::from(acl.as_str())))
            .set_server_side_encryption(
                req.server_side_encryption
                    .map(|sse| ServerSideEncryption::from(sse.as_str())),
            )
            .set_ssekms_key_id(req.sse_kms_key_id)
            .set_content_type(req.content_type)
            .set_content_length(req.content_length)
            .set_cache_control(req.cache_control)
            .set_storage_class(req.storage_class.as_deref().map(StorageClass::from))
            .set_metadata(metadata)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(convert::put_object(&response))
    }

    async fn delete_object(&self, req: DeleteObjectRequest) -> Result<DeleteObjectOutput> {
        tracing::debug!(bucket = %req.bucket, key = %req.key, "DeleteObject");

        let response = self
            .inner
            .delete_object()
            .bucket(req.bucket)
            .key(req.key)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(convert::delete_object(&response))
    }

    async fn delete_objects(&self, req: DeleteObjectsRequest) -> Result<DeleteObjectsOutput> {
        tracing::debug!(bucket = %req.bucket, count = req.objects.len(), "DeleteObjects");

        let objects = req
            .objects
            .into_iter()
            .map(|id| {
                ObjectIdentifier::builder()
                    .key(id.key)
                    .set_version_id(id.version_id)
                    .build()
                    .map_err(|e| Error::General(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(req.quiet)
            .build()
            .map_err(|e| Error::General(e.to_string()))?;

        let response = self
            .inner
            .delete_objects()
            .bucket(req.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(map_sdk_error)?;

        let output = convert::delete_objects(&response);
        if !output.errors.is_empty() {
            let failed: Vec<&str> = output.errors.iter().map(|e| e.key.as_str()).collect();
            tracing::warn!(?failed, "some objects could not be deleted");
        }
        Ok(output)
    }

    async fn list_objects(&self, req: ListObjectsRequest) -> Result<ListObjectsOutput> {
        tracing::debug!(bucket = %req.bucket, prefix = %req.prefix, "ListObjects");

        let response = self
            .inner
            .list_objects()
            .bucket(req.bucket)
            .prefix(req.prefix)
            .set_delimiter(req.delimiter)
            .set_marker(req.marker)
            .set_max_keys(req.max_keys)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(convert::list_objects(&response))
    }

    async fn list_objects_v2_pages(
        &self,
        cancel: &CancellationToken,
        req: ListObjectsV2Request,
        on_page: PageHandler<'_, ListObjectsV2Output>,
    ) -> Result<()> {
        tracing::debug!(bucket = %req.bucket, prefix = %req.prefix, "ListObjectsV2 pages");

        let mut pages = self
            .inner
            .list_objects_v2()
            .bucket(req.bucket)
            .prefix(req.prefix)
            .set_delimiter(req.delimiter)
            .set_max_keys(req.max_keys)
            .set_start_after(req.start_after)
            .set_fetch_owner(req.fetch_owner)
            .into_paginator()
            .send();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                next = pages.next() => next,
            };
            let Some(response) = next else {
                return Ok(());
            };

            let page = convert::list_objects_v2(&response.map_err(map_sdk_error)?);
            let last = !page.is_truncated;
            if !on_page(&page, last) || last {
                return Ok(());
            }
        }
    }

    async fn list_object_versions_pages(
        &self,
        cancel: &CancellationToken,
        req: ListObjectVersionsRequest,
        on_page: PageHandler<'_, ListObjectVersionsOutput>,
    ) -> Result<()> {
        tracing::debug!(bucket = %req.bucket, prefix = %req.prefix, "ListObjectVersions pages");

        let mut key_marker = req.key_marker;
        let mut version_id_marker = req.version_id_marker;

        loop {
            let request = self
                .inner
                .list_object_versions()
                .bucket(&req.bucket)
                .prefix(&req.prefix)
                .set_delimiter(req.delimiter.clone())
                .set_max_keys(req.max_keys)
                .set_key_marker(key_marker.take())
                .set_version_id_marker(version_id_marker.take());

            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                response = request.send() => response.map_err(map_sdk_error)?,
            };

            let page = convert::list_object_versions(&response);
            let last = !page.is_truncated;
            if !on_page(&page, last) || last {
                return Ok(());
            }

            if page.next_key_marker.is_none() && page.next_version_id_marker.is_none() {
                tracing::warn!(bucket = %req.bucket, "truncated version listing without markers");
                return Ok(());
            }
            key_marker = page.next_key_marker;
            version_id_marker = page.next_version_id_marker;
        }
    }

    async fn copy_object(&self, req: CopyObjectRequest) -> Result<CopyObjectOutput> {
        tracing::debug!(
            bucket = %req.bucket,
            key = %req.key,
            copy_source = %req.copy_source,
            "CopyObject"
        );

        let metadata = (!req.metadata.is_empty()).then_some(req.metadata);

        let response = self
            .inner
            .copy_object()
            .bucket(req.bucket)
            .key(req.key)
            .copy_source(req.copy_source)
            .set_metadata_directive(
                req.metadata_directive
                    .map(|d| MetadataDirective::from(d.as_str())),
            )
            .set_acl(req.acl.map(|acl| ObjectCannedAcl::from(acl.as_str())))
            .set_server_side_encryption(
                req.server_side_encryption
                    .map(|sse| ServerSideEncryption::from(sse.as_str())),
            )
            .set_ssekms_key_id(req.sse_kms_key_id)
            .set_content_type(req.content_type)
            .set_storage_class(req.storage_class.as_deref().map(StorageClass::from))
            .set_metadata(metadata)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(convert::copy_object(&response))
    }
}
