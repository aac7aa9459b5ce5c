//! Options for [`Bucket::head_object`](crate::Bucket::head_object) and
//! [`Bucket::object_exists`](crate::Bucket::object_exists)

use super::HeadObjectOption;

pub fn version_id(version_id: impl Into<String>) -> HeadObjectOption {
    let version_id = version_id.into();
    HeadObjectOption::new(move |req| req.version_id = Some(version_id))
}

pub fn if_match(etag: impl Into<String>) -> HeadObjectOption {
    let etag = etag.into();
    HeadObjectOption::new(move |req| req.if_match = Some(etag))
}

pub fn if_none_match(etag: impl Into<String>) -> HeadObjectOption {
    let etag = etag.into();
    HeadObjectOption::new(move |req| req.if_none_match = Some(etag))
}

pub fn part_number(part: i32) -> HeadObjectOption {
    HeadObjectOption::new(move |req| req.part_number = Some(part))
}
