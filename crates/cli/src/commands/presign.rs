//! presign command - Generate a presigned GET URL
//!
//! The URL can be handed to any HTTP client and stays valid until it expires.

use std::time::Duration;

use bkt_core::ConfigManager;
use bkt_core::option::get;
use clap::Args;
use serde::Serialize;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Longest expiry SigV4 accepts
const MAX_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Generate a presigned download URL
#[derive(Args, Debug)]
pub struct PresignArgs {
    /// Object path (alias/bucket/key)
    pub path: String,

    /// Expiry in seconds (defaults to the configured presign expiry)
    #[arg(long)]
    pub expires: Option<u64>,

    /// Presign a specific object version
    #[arg(long)]
    pub version_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct PresignOutput {
    url: String,
    method: String,
    expires_secs: u64,
}

/// Execute the presign command
pub async fn execute(args: PresignArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let expires_secs = match args.expires {
        Some(secs) => secs,
        None => match ConfigManager::new().and_then(|cm| cm.load()) {
            Ok(config) => config.defaults.presign_expiry_secs,
            Err(e) => return fail(&formatter, "Failed to load configuration", &e),
        },
    };
    if expires_secs == 0 || expires_secs > MAX_EXPIRY_SECS {
        formatter.error(&format!(
            "Expiry must be between 1 and {MAX_EXPIRY_SECS} seconds"
        ));
        return ExitCode::UsageError;
    }

    let (path, bucket) = match resolve(&args.path, &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };
    let key = match path.require_key() {
        Ok(key) => key,
        Err(e) => return fail(&formatter, "Invalid path", &e),
    };

    let opts = args.version_id.map(get::version_id).into_iter().collect();
    let request = bucket.get_object_request(key, opts);

    match request.presign(Duration::from_secs(expires_secs)).await {
        Ok(presigned) => {
            if formatter.is_json() {
                formatter.json(&PresignOutput {
                    url: presigned.uri,
                    method: presigned.method,
                    expires_secs,
                });
            } else {
                formatter.println(&presigned.uri);
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &format!("Failed to presign {path}"), &e),
    }
}
