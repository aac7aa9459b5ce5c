//! Options for [`Bucket::copy_object`](crate::Bucket::copy_object)

use super::CopyObjectOption;
use crate::request::{CannedAcl, MetadataDirective, ServerSideEncryption};

/// Copy a specific version of the source object
pub fn source_version_id(version_id: impl Into<String>) -> CopyObjectOption {
    let version_id = version_id.into();
    CopyObjectOption::new(move |req| {
        // drop a previously set version so the last option wins
        if let Some(pos) = req.copy_source.find("?versionId=") {
            req.copy_source.truncate(pos);
        }
        let escaped: String = url::form_urlencoded::byte_serialize(version_id.as_bytes()).collect();
        req.copy_source.push_str("?versionId=");
        req.copy_source.push_str(&escaped);
    })
}

/// Take metadata from the request instead of the source object
pub fn metadata_directive_replace() -> CopyObjectOption {
    CopyObjectOption::new(|req| req.metadata_directive = Some(MetadataDirective::Replace))
}

/// Set the destination content type; implies a `REPLACE` metadata directive
pub fn content_type(content_type: impl Into<String>) -> CopyObjectOption {
    let content_type = content_type.into();
    CopyObjectOption::new(move |req| {
        req.content_type = Some(content_type);
        req.metadata_directive = Some(MetadataDirective::Replace);
    })
}

/// Add one user metadata entry; implies a `REPLACE` metadata directive
pub fn metadata(key: impl Into<String>, value: impl Into<String>) -> CopyObjectOption {
    let (key, value) = (key.into(), value.into());
    CopyObjectOption::new(move |req| {
        req.metadata.insert(key, value);
        req.metadata_directive = Some(MetadataDirective::Replace);
    })
}

pub fn acl_private() -> CopyObjectOption {
    CopyObjectOption::new(|req| req.acl = Some(CannedAcl::Private))
}

pub fn acl_public_read() -> CopyObjectOption {
    CopyObjectOption::new(|req| req.acl = Some(CannedAcl::PublicRead))
}

pub fn sse_s3() -> CopyObjectOption {
    CopyObjectOption::new(|req| req.server_side_encryption = Some(ServerSideEncryption::Aes256))
}

pub fn sse_kms_key_id(key_id: impl Into<String>) -> CopyObjectOption {
    let key_id = key_id.into();
    CopyObjectOption::new(move |req| {
        req.sse_kms_key_id = Some(key_id);
        req.server_side_encryption = Some(ServerSideEncryption::AwsKms);
    })
}

pub fn storage_class(class: impl Into<String>) -> CopyObjectOption {
    let class = class.into();
    CopyObjectOption::new(move |req| req.storage_class = Some(class))
}
