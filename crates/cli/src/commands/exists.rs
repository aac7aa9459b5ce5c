//! exists command - Check for an object
//!
//! Exits 0 when the object exists and 5 when the service answers 404.
//! Any other failure keeps its own exit code.

use bkt_core::option::head;
use clap::Args;
use serde::Serialize;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Check whether an object exists
#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// Object path (alias/bucket/key)
    pub path: String,

    /// Check a specific object version
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExistsOutput<'a> {
    key: &'a str,
    exists: bool,
}

/// Execute the exists command
pub async fn execute(args: ExistsArgs, output_config: OutputConfig) -> ExitCode {
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

    match bucket.object_exists(key, opts).await {
        Ok(exists) => {
            if formatter.is_json() {
                formatter.json(&ExistsOutput { key, exists });
            } else {
                formatter.println(if exists { "true" } else { "false" });
            }
            if exists {
                ExitCode::Success
            } else {
                ExitCode::NotFound
            }
        }
        Err(e) => fail(&formatter, &format!("Failed to check {path}"), &e),
    }
}
