//! cp command - Server-side copy within a bucket
//!
//! The destination is a key in the source object's bucket; object data never
//! passes through this process.

use bkt_core::option::copy;
use clap::Args;
use serde::Serialize;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Copy an object to another key of the same bucket
#[derive(Args, Debug)]
pub struct CpArgs {
    /// Source object path (alias/bucket/key)
    pub source: String,

    /// Destination key inside the source bucket
    pub dest_key: String,

    /// Copy a specific version of the source
    #[arg(long)]
    pub source_version_id: Option<String>,

    /// Replace the content type instead of copying it
    #[arg(long)]
    pub content_type: Option<String>,

    /// Storage class of the new object
    #[arg(long)]
    pub storage_class: Option<String>,
}

#[derive(Debug, Serialize)]
struct CpOutput<'a> {
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
}

/// Execute the cp command
pub async fn execute(args: CpArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if args.dest_key.is_empty() || args.dest_key.ends_with('/') {
        formatter.error(&format!("Invalid destination key '{}'", args.dest_key));
        return ExitCode::UsageError;
    }

    let (path, bucket) = match resolve(&args.source, &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };
    let src = match path.require_key() {
        Ok(key) => key,
        Err(e) => return fail(&formatter, "Invalid path", &e),
    };

    let mut opts = Vec::new();
    if let Some(version_id) = args.source_version_id {
        opts.push(copy::source_version_id(version_id));
    }
    if let Some(content_type) = args.content_type {
        opts.push(copy::content_type(content_type));
    }
    if let Some(class) = args.storage_class {
        opts.push(copy::storage_class(class));
    }

    match bucket.copy_object(&args.dest_key, src, opts).await {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&CpOutput {
                    source: src,
                    target: &args.dest_key,
                    etag: output.etag,
                    version_id: output.version_id,
                });
            } else {
                formatter.success(&format!(
                    "{path} -> {}/{}/{}",
                    path.alias, path.bucket, args.dest_key
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &format!("Failed to copy {path}"), &e),
    }
}
