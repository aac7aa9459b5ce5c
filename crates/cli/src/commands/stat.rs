//! stat command - Show object metadata
//!
//! Displays detailed metadata information about an object.

use bkt_core::ObjectMetadata;
use bkt_core::option::head;
use clap::Args;
use serde::Serialize;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, format_size};

/// Show object metadata
#[derive(Args, Debug)]
pub struct StatArgs {
    /// Object path (alias/bucket/key)
    pub path: String,

    /// Inspect a specific object version
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatOutput<'a> {
    name: &'a str,
    #[serde(flatten)]
    metadata: &'a ObjectMetadata,
}

/// Execute the stat command
pub async fn execute(args: StatArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (path, bucket) = match resolve(&args.path, &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };
    let key = match path.require_key() {
        Ok(key) => key,
        Err(e) => return fail(&formatter, "Invalid path", &e),
    };

    let opts = args.version_id.map(head::version_id).into_iter().collect();

    match bucket.head_object(key, opts).await {
        Ok(info) => {
            if formatter.is_json() {
                formatter.json(&StatOutput {
                    name: key,
                    metadata: &info,
                });
            } else {
                print_metadata(&formatter, key, &info);
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &format!("Failed to stat {path}"), &e),
    }
}

fn print_metadata(formatter: &Formatter, key: &str, info: &ObjectMetadata) {
    formatter.field("Name", key);
    if let Some(modified) = info.last_modified {
        formatter.field("Date", modified.strftime("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(size) = info.content_length {
        formatter.field("Size", format!("{} ({size} bytes)", format_size(size)));
    }
    if let Some(etag) = &info.etag {
        formatter.field("ETag", etag);
    }
    if let Some(ct) = &info.content_type {
        formatter.field("Type", ct);
    }
    if let Some(sc) = &info.storage_class {
        formatter.field("Class", sc);
    }
    if let Some(version) = &info.version_id {
        formatter.field("VersionID", version);
    }
    if let Some(sse) = &info.server_side_encryption {
        formatter.field("Encrypted", sse);
    }
    let mut metadata: Vec<_> = info.metadata.iter().collect();
    metadata.sort();
    for (name, value) in metadata {
        formatter.field("Metadata", format!("{name}={value}"));
    }
}
