//! Options for [`Bucket::list_objects`](crate::Bucket::list_objects)

use super::ListObjectsOption;

pub fn delimiter(delimiter: impl Into<String>) -> ListObjectsOption {
    let delimiter = delimiter.into();
    ListObjectsOption::new(move |req| req.delimiter = Some(delimiter))
}

/// Start listing after this key
pub fn marker(marker: impl Into<String>) -> ListObjectsOption {
    let marker = marker.into();
    ListObjectsOption::new(move |req| req.marker = Some(marker))
}

pub fn max_keys(max_keys: i32) -> ListObjectsOption {
    ListObjectsOption::new(move |req| req.max_keys = Some(max_keys))
}
