//! Remote path parsing
//!
//! Remote paths have the form `alias/bucket[/key]`. The key keeps every
//! character after the bucket separator, including further slashes.

use crate::alias::is_valid_alias_name;
use crate::error::{Error, Result};

/// A parsed remote path pointing to an S3 location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    pub alias: String,
    pub bucket: String,
    /// Object key or prefix (empty for bucket root)
    pub key: String,
}

impl RemotePath {
    pub fn new(
        alias: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Fail unless the path names a single object
    pub fn require_key(&self) -> Result<&str> {
        if self.key.is_empty() || self.key.ends_with('/') {
            return Err(Error::InvalidPath(format!(
                "'{self}' does not name an object. Expected: alias/bucket/key"
            )));
        }
        Ok(&self.key)
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}/{}", self.alias, self.bucket)
        } else {
            write!(f, "{}/{}/{}", self.alias, self.bucket, self.key)
        }
    }
}

impl std::str::FromStr for RemotePath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        parse_path(path)
    }
}

/// Parse `alias/bucket[/key]`
pub fn parse_path(path: &str) -> Result<RemotePath> {
    if path.is_empty() {
        return Err(Error::InvalidPath("Path cannot be empty".into()));
    }

    let mut parts = path.splitn(3, '/');
    let alias = parts.next().unwrap_or_default();
    let bucket = parts.next().unwrap_or_default();
    let key = parts.next().unwrap_or_default();

    if !is_valid_alias_name(alias) {
        return Err(Error::InvalidPath(format!(
            "Invalid alias '{alias}' in '{path}'"
        )));
    }
    if bucket.is_empty() {
        return Err(Error::InvalidPath(format!(
            "Path '{path}' is incomplete. Use format: alias/bucket[/key]"
        )));
    }

    Ok(RemotePath::new(alias, bucket, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_path() {
        let path = parse_path("minio/bucket/dir/file.txt").unwrap();
        assert_eq!(path.alias, "minio");
        assert_eq!(path.bucket, "bucket");
        assert_eq!(path.key, "dir/file.txt");
        assert_eq!(path.require_key().unwrap(), "dir/file.txt");
    }

    #[test]
    fn test_parse_bucket_only() {
        let path: RemotePath = "minio/bucket".parse().unwrap();
        assert_eq!(path.key, "");
        assert!(path.require_key().is_err());

        let path = parse_path("minio/bucket/").unwrap();
        assert_eq!(path.key, "");
    }

    #[test]
    fn test_prefix_is_not_an_object() {
        let path = parse_path("minio/bucket/logs/").unwrap();
        assert_eq!(path.key, "logs/");
        assert!(path.require_key().is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_path("").is_err());
        assert!(parse_path("minio").is_err());
        assert!(parse_path("minio/").is_err());
        assert!(parse_path("bad alias/bucket").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RemotePath::new("minio", "bucket", "key/file.txt").to_string(),
            "minio/bucket/key/file.txt"
        );
        assert_eq!(RemotePath::new("minio", "bucket", "").to_string(), "minio/bucket");
    }
}
