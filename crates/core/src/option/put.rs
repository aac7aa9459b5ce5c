//! Options for [`Bucket::put_object`](crate::Bucket::put_object)

use super::PutObjectOption;
use crate::request::{CannedAcl, ServerSideEncryption};

/// Encrypt with SSE-KMS using `key_id`
pub fn sse_kms_key_id(key_id: impl Into<String>) -> PutObjectOption {
    let key_id = key_id.into();
    PutObjectOption::new(move |req| {
        req.sse_kms_key_id = Some(key_id);
        req.server_side_encryption = Some(ServerSideEncryption::AwsKms);
    })
}

/// Encrypt with provider-managed keys (SSE-S3, AES256)
pub fn sse_s3() -> PutObjectOption {
    PutObjectOption::new(|req| req.server_side_encryption = Some(ServerSideEncryption::Aes256))
}

pub fn acl_private() -> PutObjectOption {
    PutObjectOption::new(|req| req.acl = Some(CannedAcl::Private))
}

pub fn acl_public_read() -> PutObjectOption {
    PutObjectOption::new(|req| req.acl = Some(CannedAcl::PublicRead))
}

pub fn content_type(content_type: impl Into<String>) -> PutObjectOption {
    let content_type = content_type.into();
    PutObjectOption::new(move |req| req.content_type = Some(content_type))
}

pub fn content_length(length: i64) -> PutObjectOption {
    PutObjectOption::new(move |req| req.content_length = Some(length))
}

pub fn cache_control(value: impl Into<String>) -> PutObjectOption {
    let value = value.into();
    PutObjectOption::new(move |req| req.cache_control = Some(value))
}

pub fn storage_class(class: impl Into<String>) -> PutObjectOption {
    let class = class.into();
    PutObjectOption::new(move |req| req.storage_class = Some(class))
}

/// Add one user metadata entry; repeated keys keep the last value
pub fn metadata(key: impl Into<String>, value: impl Into<String>) -> PutObjectOption {
    let (key, value) = (key.into(), value.into());
    PutObjectOption::new(move |req| {
        req.metadata.insert(key, value);
    })
}
