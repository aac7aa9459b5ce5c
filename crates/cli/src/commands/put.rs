//! put command - Upload a local file
//!
//! The file is handed to the store as a path so the body can be re-read
//! when a request is retried.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bkt_core::ObjectContent;
use bkt_core::option::{PutObjectOption, put};
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, format_size};

/// Canned ACLs accepted on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Acl {
    Private,
    PublicRead,
}

/// Server-side encryption modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sse {
    /// SSE-S3 (AES256)
    S3,
    /// SSE-KMS, requires --kms-key-id
    Kms,
}

/// Upload a local file as an object
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Destination path (alias/bucket/key)
    pub path: String,

    /// Content type; guessed from the file extension when omitted
    #[arg(long)]
    pub content_type: Option<String>,

    /// Canned ACL
    #[arg(long, value_enum)]
    pub acl: Option<Acl>,

    /// Server-side encryption
    #[arg(long, value_enum)]
    pub sse: Option<Sse>,

    /// KMS key ID for SSE-KMS (implies --sse kms)
    #[arg(long)]
    pub kms_key_id: Option<String>,

    /// Storage class, e.g. STANDARD_IA
    #[arg(long)]
    pub storage_class: Option<String>,
}

#[derive(Debug, Serialize)]
struct PutOutput {
    key: String,
    size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let size = match local_file_size(&args.file).await {
        Ok(size) => size,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            return ExitCode::UsageError;
        }
    };

    let opts = match put_options(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            formatter.error(&msg);
            return ExitCode::UsageError;
        }
    };

    let (path, bucket) = match resolve(&args.path, &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };
    let key = match path.require_key() {
        Ok(key) => key,
        Err(e) => return fail(&formatter, "Invalid path", &e),
    };

    let body = ObjectContent::File(args.file.clone());
    match bucket.put_object(key, body, opts).await {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&PutOutput {
                    key: key.to_string(),
                    size_bytes: size,
                    etag: output.etag,
                    version_id: output.version_id,
                });
            } else {
                formatter.success(&format!(
                    "{} -> {path} ({})",
                    args.file.display(),
                    format_size(size as i64)
                ));
            }
            ExitCode::Success
        }
        Err(e) => fail(&formatter, &format!("Failed to upload to {path}"), &e),
    }
}

async fn local_file_size(file: &Path) -> anyhow::Result<u64> {
    let meta = tokio::fs::metadata(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    anyhow::ensure!(meta.is_file(), "{} is not a regular file", file.display());
    Ok(meta.len())
}

/// Translate flags into put options, in the order they are applied
fn put_options(args: &PutArgs) -> Result<Vec<PutObjectOption>, String> {
    let mut opts = Vec::new();

    let content_type = args.content_type.clone().or_else(|| {
        mime_guess::from_path(&args.file)
            .first()
            .map(|m| m.essence_str().to_string())
    });
    if let Some(content_type) = content_type {
        opts.push(put::content_type(content_type));
    }

    match args.acl {
        Some(Acl::Private) => opts.push(put::acl_private()),
        Some(Acl::PublicRead) => opts.push(put::acl_public_read()),
        None => {}
    }

    match (args.sse, &args.kms_key_id) {
        (Some(Sse::S3), Some(_)) => {
            return Err("--kms-key-id cannot be combined with --sse s3".to_string());
        }
        (Some(Sse::Kms), None) => {
            return Err("--sse kms requires --kms-key-id".to_string());
        }
        (Some(Sse::S3), None) => opts.push(put::sse_s3()),
        (_, Some(key_id)) => opts.push(put::sse_kms_key_id(key_id.clone())),
        (None, None) => {}
    }

    if let Some(class) = &args.storage_class {
        opts.push(put::storage_class(class.clone()));
    }

    Ok(opts)
}
