//! rm command - Remove objects
//!
//! One key is removed with a single delete request. Several keys (or a
//! specific version) go through batch deletes of at most
//! [`MAX_DELETE_OBJECTS`] identifiers each.

use bkt_core::{Bucket, DeleteObjectError, MAX_DELETE_OBJECTS, ObjectIdentifier, parse_path};
use clap::Args;
use serde::Serialize;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object paths (alias/bucket/key); all must share alias and bucket
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Remove a specific version (single path only)
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct RmOutput {
    deleted: Vec<String>,
    errors: Vec<DeleteObjectError>,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if args.version_id.is_some() && args.paths.len() > 1 {
        formatter.error("--version-id can only be used with a single path");
        return ExitCode::UsageError;
    }

    let keys = match collect_keys(&args.paths) {
        Ok(keys) => keys,
        Err(e) => return fail(&formatter, "Invalid path", &e),
    };

    let (path, bucket) = match resolve(&args.paths[0], &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };

    let result = match args.version_id {
        Some(version_id) => {
            let id = ObjectIdentifier::with_version(&keys[0], version_id);
            delete_batched(&bucket, vec![id]).await
        }
        None if keys.len() == 1 => {
            let result = bucket.delete_object(&keys[0]).await;
            result.map(|_| RmOutput {
                deleted: keys,
                ..Default::default()
            })
        }
        None => delete_batched(&bucket, keys.iter().map(ObjectIdentifier::new).collect()).await,
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => return fail(&formatter, &format!("Failed to remove from {path}"), &e),
    };

    if formatter.is_json() {
        formatter.json(&output);
    } else {
        for key in &output.deleted {
            formatter.success(&format!("Removed {}/{}/{key}", path.alias, path.bucket));
        }
        for err in &output.errors {
            formatter.error(&format!(
                "Failed to remove {}: {}",
                err.key,
                err.message.as_deref().or(err.code.as_deref()).unwrap_or("unknown error")
            ));
        }
    }

    if output.errors.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}

/// Parse every path and check they all point into the same bucket
fn collect_keys(paths: &[String]) -> bkt_core::Result<Vec<String>> {
    let mut first: Option<(String, String)> = None;
    let mut keys = Vec::with_capacity(paths.len());

    for raw in paths {
        let path = parse_path(raw)?;
        keys.push(path.require_key()?.to_string());
        match &first {
            None => first = Some((path.alias, path.bucket)),
            Some((alias, bucket)) if *alias == path.alias && *bucket == path.bucket => {}
            Some((alias, bucket)) => {
                return Err(bkt_core::Error::InvalidPath(format!(
                    "'{raw}' is not in {alias}/{bucket}"
                )));
            }
        }
    }
    Ok(keys)
}

async fn delete_batched(
    bucket: &Bucket,
    identifiers: Vec<ObjectIdentifier>,
) -> bkt_core::Result<RmOutput> {
    let mut output = RmOutput::default();
    for chunk in identifiers.chunks(MAX_DELETE_OBJECTS) {
        let result = bucket.delete_objects(chunk.to_vec()).await?;
        output
            .deleted
            .extend(result.deleted.into_iter().map(|d| d.key));
        output.errors.extend(result.errors);
    }
    Ok(output)
}
