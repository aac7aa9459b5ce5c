//! Options for [`Bucket::list_objects_v2_pages`](crate::Bucket::list_objects_v2_pages)

use super::ListObjectsV2Option;

pub fn delimiter(delimiter: impl Into<String>) -> ListObjectsV2Option {
    let delimiter = delimiter.into();
    ListObjectsV2Option::new(move |req| req.delimiter = Some(delimiter))
}

/// Maximum number of keys per page
pub fn max_keys(max_keys: i32) -> ListObjectsV2Option {
    ListObjectsV2Option::new(move |req| req.max_keys = Some(max_keys))
}

pub fn start_after(key: impl Into<String>) -> ListObjectsV2Option {
    let key = key.into();
    ListObjectsV2Option::new(move |req| req.start_after = Some(key))
}

pub fn fetch_owner(fetch: bool) -> ListObjectsV2Option {
    ListObjectsV2Option::new(move |req| req.fetch_owner = Some(fetch))
}
