//! Conversions from SDK output shapes to bkt-core response values

use aws_sdk_s3::operation::copy_object::CopyObjectOutput as SdkCopyObjectOutput;
use aws_sdk_s3::operation::delete_object::DeleteObjectOutput as SdkDeleteObjectOutput;
use aws_sdk_s3::operation::delete_objects::DeleteObjectsOutput as SdkDeleteObjectsOutput;
use aws_sdk_s3::operation::get_object::GetObjectOutput as SdkGetObjectOutput;
use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_sdk_s3::operation::list_object_versions::ListObjectVersionsOutput as SdkListObjectVersionsOutput;
use aws_sdk_s3::operation::list_objects::ListObjectsOutput as SdkListObjectsOutput;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output as SdkListObjectsV2Output;
use aws_sdk_s3::operation::put_object::PutObjectOutput as SdkPutObjectOutput;
use aws_sdk_s3::types::{CommonPrefix, Object};
use bkt_core::{
    CopyObjectOutput, DeleteMarker, DeleteObjectError, DeleteObjectOutput, DeleteObjectsOutput,
    DeletedObject, ListObjectVersionsOutput, ListObjectsOutput, ListObjectsV2Output,
    ObjectMetadata, ObjectSummary, ObjectVersion, PutObjectOutput,
};

pub(crate) fn timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

pub(crate) fn etag(etag: Option<&str>) -> Option<String> {
    etag.map(|e| e.trim_matches('"').to_string())
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn common_prefixes(prefixes: &[CommonPrefix]) -> Vec<String> {
    prefixes
        .iter()
        .filter_map(|p| p.prefix().map(str::to_string))
        .collect()
}

fn summary(object: &Object) -> ObjectSummary {
    ObjectSummary {
        key: object.key().unwrap_or_default().to_string(),
        size: object.size(),
        last_modified: object.last_modified().and_then(timestamp),
        etag: etag(object.e_tag()),
        storage_class: object.storage_class().map(|sc| sc.as_str().to_string()),
    }
}

pub(crate) fn head_metadata(response: &HeadObjectOutput) -> ObjectMetadata {
    ObjectMetadata {
        content_length: response.content_length(),
        content_type: owned(response.content_type()),
        etag: etag(response.e_tag()),
        last_modified: response.last_modified().and_then(timestamp),
        version_id: owned(response.version_id()),
        storage_class: response.storage_class().map(|sc| sc.as_str().to_string()),
        server_side_encryption: response
            .server_side_encryption()
            .map(|s| s.as_str().to_string()),
        sse_kms_key_id: owned(response.ssekms_key_id()),
        cache_control: owned(response.cache_control()),
        delete_marker: response.delete_marker().unwrap_or(false),
        metadata: response.metadata().cloned().unwrap_or_default(),
    }
}

pub(crate) fn get_metadata(response: &SdkGetObjectOutput) -> ObjectMetadata {
    ObjectMetadata {
        content_length: response.content_length(),
        content_type: owned(response.content_type()),
        etag: etag(response.e_tag()),
        last_modified: response.last_modified().and_then(timestamp),
        version_id: owned(response.version_id()),
        storage_class: response.storage_class().map(|sc| sc.as_str().to_string()),
        server_side_encryption: response
            .server_side_encryption()
            .map(|s| s.as_str().to_string()),
        sse_kms_key_id: owned(response.ssekms_key_id()),
        cache_control: owned(response.cache_control()),
        delete_marker: response.delete_marker().unwrap_or(false),
        metadata: response.metadata().cloned().unwrap_or_default(),
    }
}

pub(crate) fn put_object(response: &SdkPutObjectOutput) -> PutObjectOutput {
    PutObjectOutput {
        etag: etag(response.e_tag()),
        version_id: owned(response.version_id()),
        server_side_encryption: response
            .server_side_encryption()
            .map(|s| s.as_str().to_string()),
        sse_kms_key_id: owned(response.ssekms_key_id()),
    }
}

pub(crate) fn delete_object(response: &SdkDeleteObjectOutput) -> DeleteObjectOutput {
    DeleteObjectOutput {
        delete_marker: response.delete_marker().unwrap_or(false),
        version_id: owned(response.version_id()),
    }
}

pub(crate) fn delete_objects(response: &SdkDeleteObjectsOutput) -> DeleteObjectsOutput {
    DeleteObjectsOutput {
        deleted: response
            .deleted()
            .iter()
            .map(|d| DeletedObject {
                key: d.key().unwrap_or_default().to_string(),
                version_id: owned(d.version_id()),
                delete_marker: d.delete_marker().unwrap_or(false),
            })
            .collect(),
        errors: response
            .errors()
            .iter()
            .map(|e| DeleteObjectError {
                key: e.key().unwrap_or_default().to_string(),
                version_id: owned(e.version_id()),
                code: owned(e.code()),
                message: owned(e.message()),
            })
            .collect(),
    }
}

pub(crate) fn list_objects(response: &SdkListObjectsOutput) -> ListObjectsOutput {
    ListObjectsOutput {
        contents: response.contents().iter().map(summary).collect(),
        common_prefixes: common_prefixes(response.common_prefixes()),
        is_truncated: response.is_truncated().unwrap_or(false),
        next_marker: owned(response.next_marker()),
    }
}

pub(crate) fn list_objects_v2(response: &SdkListObjectsV2Output) -> ListObjectsV2Output {
    ListObjectsV2Output {
        contents: response.contents().iter().map(summary).collect(),
        common_prefixes: common_prefixes(response.common_prefixes()),
        key_count: response.key_count().unwrap_or(0),
        is_truncated: response.is_truncated().unwrap_or(false),
        next_continuation_token: owned(response.next_continuation_token()),
    }
}

pub(crate) fn list_object_versions(
    response: &SdkListObjectVersionsOutput,
) -> ListObjectVersionsOutput {
    ListObjectVersionsOutput {
        versions: response
            .versions()
            .iter()
            .map(|v| ObjectVersion {
                key: v.key().unwrap_or_default().to_string(),
                version_id: owned(v.version_id()),
                is_latest: v.is_latest().unwrap_or(false),
                size: v.size(),
                last_modified: v.last_modified().and_then(timestamp),
                etag: etag(v.e_tag()),
            })
            .collect(),
        delete_markers: response
            .delete_markers()
            .iter()
            .map(|m| DeleteMarker {
                key: m.key().unwrap_or_default().to_string(),
                version_id: owned(m.version_id()),
                is_latest: m.is_latest().unwrap_or(false),
                last_modified: m.last_modified().and_then(timestamp),
            })
            .collect(),
        common_prefixes: common_prefixes(response.common_prefixes()),
        is_truncated: response.is_truncated().unwrap_or(false),
        next_key_marker: owned(response.next_key_marker()),
        next_version_id_marker: owned(response.next_version_id_marker()),
    }
}

pub(crate) fn copy_object(response: &SdkCopyObjectOutput) -> CopyObjectOutput {
    let result = response.copy_object_result();
    CopyObjectOutput {
        etag: etag(result.and_then(|r| r.e_tag())),
        last_modified: result.and_then(|r| r.last_modified()).and_then(timestamp),
        version_id: owned(response.version_id()),
        copy_source_version_id: owned(response.copy_source_version_id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::{
        CopyObjectResult, DeleteMarkerEntry, DeletedObject as SdkDeletedObject,
        Error as SdkDeleteError, ObjectVersion as SdkObjectVersion, ServerSideEncryption,
        StorageClass,
    };
    use aws_smithy_types::DateTime;

    #[test]
    fn test_timestamp_keeps_subseconds() {
        let ts = timestamp(&DateTime::from_secs_and_nanos(1_700_000_000, 500)).unwrap();
        assert_eq!(ts.as_second(), 1_700_000_000);
        assert_eq!(ts.subsec_nanosecond(), 500);
    }

    #[test]
    fn test_etag_unquoted() {
        assert_eq!(etag(Some("\"abc\"")), Some("abc".to_string()));
        assert_eq!(etag(Some("abc")), Some("abc".to_string()));
        assert_eq!(etag(None), None);
    }

    #[test]
    fn test_head_metadata() {
        let response = HeadObjectOutput::builder()
            .content_length(42)
            .content_type("text/plain")
            .e_tag("\"deadbeef\"")
            .version_id("v1")
            .server_side_encryption(ServerSideEncryption::AwsKms)
            .ssekms_key_id("key")
            .storage_class(StorageClass::StandardIa)
            .metadata("owner", "ops")
            .build();

        let meta = head_metadata(&response);
        assert_eq!(meta.content_length, Some(42));
        assert_eq!(meta.content_type.as_deref(), Some("text/plain"));
        assert_eq!(meta.etag.as_deref(), Some("deadbeef"));
        assert_eq!(meta.version_id.as_deref(), Some("v1"));
        assert_eq!(meta.server_side_encryption.as_deref(), Some("aws:kms"));
        assert_eq!(meta.sse_kms_key_id.as_deref(), Some("key"));
        assert_eq!(meta.storage_class.as_deref(), Some("STANDARD_IA"));
        assert_eq!(meta.metadata["owner"], "ops");
        assert!(!meta.delete_marker);
    }

    #[test]
    fn test_list_objects_v2_page() {
        let response = SdkListObjectsV2Output::builder()
            .contents(Object::builder().key("logs/a").size(3).e_tag("\"1\"").build())
            .contents(Object::builder().key("logs/b").size(5).build())
            .common_prefixes(CommonPrefix::builder().prefix("logs/old/").build())
            .key_count(2)
            .is_truncated(true)
            .next_continuation_token("token")
            .build();

        let page = list_objects_v2(&response);
        assert_eq!(page.contents.len(), 2);
        assert_eq!(page.contents[0].key, "logs/a");
        assert_eq!(page.contents[0].etag.as_deref(), Some("1"));
        assert_eq!(page.contents[1].size, Some(5));
        assert_eq!(page.common_prefixes, vec!["logs/old/".to_string()]);
        assert_eq!(page.key_count, 2);
        assert!(page.is_truncated);
        assert_eq!(page.next_continuation_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_list_object_versions_page() {
        let response = SdkListObjectVersionsOutput::builder()
            .versions(
                SdkObjectVersion::builder()
                    .key("a")
                    .version_id("v2")
                    .is_latest(true)
                    .size(1)
                    .build(),
            )
            .delete_markers(
                DeleteMarkerEntry::builder()
                    .key("b")
                    .version_id("v9")
                    .is_latest(true)
                    .build(),
            )
            .is_truncated(true)
            .next_key_marker("a")
            .next_version_id_marker("v2")
            .build();

        let page = list_object_versions(&response);
        assert_eq!(page.versions[0].version_id.as_deref(), Some("v2"));
        assert!(page.versions[0].is_latest);
        assert_eq!(page.delete_markers[0].key, "b");
        assert_eq!(page.next_key_marker.as_deref(), Some("a"));
        assert_eq!(page.next_version_id_marker.as_deref(), Some("v2"));
    }

    #[test]
    fn test_delete_objects_reports_failures() {
        let response = SdkDeleteObjectsOutput::builder()
            .deleted(SdkDeletedObject::builder().key("gone").build())
            .errors(
                SdkDeleteError::builder()
                    .key("kept")
                    .code("AccessDenied")
                    .message("Access Denied")
                    .build(),
            )
            .build();

        let out = delete_objects(&response);
        assert_eq!(out.deleted.len(), 1);
        assert_eq!(out.deleted[0].key, "gone");
        assert_eq!(out.errors[0].key, "kept");
        assert_eq!(out.errors[0].code.as_deref(), Some("AccessDenied"));
    }

    #[test]
    fn test_copy_object_result() {
        let response = SdkCopyObjectOutput::builder()
            .copy_object_result(CopyObjectResult::builder().e_tag("\"c0ffee\"").build())
            .version_id("v3")
            .build();

        let out = copy_object(&response);
        assert_eq!(out.etag.as_deref(), Some("c0ffee"));
        assert_eq!(out.version_id.as_deref(), Some("v3"));
        assert!(out.last_modified.is_none());
    }
}
