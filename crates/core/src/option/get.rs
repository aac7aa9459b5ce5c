//! Options for [`Bucket::get_object`](crate::Bucket::get_object) and friends

use super::GetObjectOption;

pub fn version_id(version_id: impl Into<String>) -> GetObjectOption {
    let version_id = version_id.into();
    GetObjectOption::new(move |req| req.version_id = Some(version_id))
}

/// Raw `Range` header value, e.g. `bytes=0-1023`
pub fn range(range: impl Into<String>) -> GetObjectOption {
    let range = range.into();
    GetObjectOption::new(move |req| req.range = Some(range))
}

/// Inclusive byte range `first..=last`
pub fn byte_range(first: u64, last: u64) -> GetObjectOption {
    range(format!("bytes={first}-{last}"))
}

pub fn if_match(etag: impl Into<String>) -> GetObjectOption {
    let etag = etag.into();
    GetObjectOption::new(move |req| req.if_match = Some(etag))
}

pub fn if_none_match(etag: impl Into<String>) -> GetObjectOption {
    let etag = etag.into();
    GetObjectOption::new(move |req| req.if_none_match = Some(etag))
}

pub fn part_number(part: i32) -> GetObjectOption {
    GetObjectOption::new(move |req| req.part_number = Some(part))
}
