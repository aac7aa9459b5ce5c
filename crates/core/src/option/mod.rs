//! Request options
//!
//! An option is a one-shot mutator for a single request kind. Bucket methods
//! apply the options they are given in order after the bucket and key are set,
//! so when two options assign the same field the later one wins.
//!
//! ```
//! use bkt_core::option::put;
//!
//! let opts = vec![put::sse_s3(), put::acl_private(), put::content_type("text/plain")];
//! # let _ = opts;
//! ```

use std::fmt;

use crate::request::{
    CopyObjectRequest, GetObjectRequest, HeadObjectRequest, ListObjectVersionsRequest,
    ListObjectsRequest, ListObjectsV2Request, PutObjectRequest,
};

pub mod copy;
pub mod get;
pub mod head;
pub mod list;
pub mod list_v2;
pub mod list_versions;
pub mod put;

/// A configuration mutator for requests of type `R`
pub struct RequestOption<R>(Box<dyn FnOnce(&mut R) + Send>);

impl<R> RequestOption<R> {
    /// Wrap a closure as an option
    pub fn new(f: impl FnOnce(&mut R) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Apply this option to `req`, consuming it
    pub fn apply(self, req: &mut R) {
        (self.0)(req)
    }
}

impl<R> fmt::Debug for RequestOption<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestOption")
    }
}

/// Apply `opts` to `req` left to right
pub fn apply_all<R>(req: &mut R, opts: impl IntoIterator<Item = RequestOption<R>>) {
    for opt in opts {
        opt.apply(req);
    }
}

pub type GetObjectOption = RequestOption<GetObjectRequest>;
pub type HeadObjectOption = RequestOption<HeadObjectRequest>;
pub type PutObjectOption = RequestOption<PutObjectRequest>;
pub type ListObjectsOption = RequestOption<ListObjectsRequest>;
pub type ListObjectsV2Option = RequestOption<ListObjectsV2Request>;
pub type ListObjectVersionsOption = RequestOption<ListObjectVersionsRequest>;
pub type CopyObjectOption = RequestOption<CopyObjectRequest>;
