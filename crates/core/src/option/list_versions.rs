//! Options for [`Bucket::list_object_versions_pages`](crate::Bucket::list_object_versions_pages)

use super::ListObjectVersionsOption;

pub fn delimiter(delimiter: impl Into<String>) -> ListObjectVersionsOption {
    let delimiter = delimiter.into();
    ListObjectVersionsOption::new(move |req| req.delimiter = Some(delimiter))
}

/// Maximum number of versions per page
pub fn max_keys(max_keys: i32) -> ListObjectVersionsOption {
    ListObjectVersionsOption::new(move |req| req.max_keys = Some(max_keys))
}

pub fn key_marker(key: impl Into<String>) -> ListObjectVersionsOption {
    let key = key.into();
    ListObjectVersionsOption::new(move |req| req.key_marker = Some(key))
}

/// Only meaningful together with [`key_marker`]
pub fn version_id_marker(version_id: impl Into<String>) -> ListObjectVersionsOption {
    let version_id = version_id.into();
    ListObjectVersionsOption::new(move |req| req.version_id_marker = Some(version_id))
}
