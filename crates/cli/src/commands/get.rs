//! get command - Download an object
//!
//! Streams the object body to stdout, or to a file with `-o`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bkt_core::ObjectBody;
use bkt_core::option::get;
use clap::Args;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, format_size};

/// Download an object
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Object path (alias/bucket/key)
    pub path: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fetch a specific object version
    #[arg(long)]
    pub version_id: Option<String>,

    /// Byte range, e.g. "bytes=0-99"
    #[arg(long)]
    pub range: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    key: String,
    file: String,
    size_bytes: u64,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let (path, bucket) = match resolve(&args.path, &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };
    let key = match path.require_key() {
        Ok(key) => key,
        Err(e) => return fail(&formatter, "Invalid path", &e),
    };

    let mut opts = Vec::new();
    if let Some(version_id) = args.version_id {
        opts.push(get::version_id(version_id));
    }
    if let Some(range) = args.range {
        opts.push(get::range(range));
    }

    let body = match bucket.get_object_reader(key, opts).await {
        Ok(body) => body,
        Err(e) => return fail(&formatter, &format!("Failed to get {path}"), &e),
    };

    let Some(file) = args.output else {
        return match copy_to_stdout(body).await {
            Ok(_) => ExitCode::Success,
            Err(e) => {
                formatter.error(&format!("{e:#}"));
                ExitCode::GeneralError
            }
        };
    };

    match copy_to_file(body, &file).await {
        Ok(size) => {
            if formatter.is_json() {
                formatter.json(&GetOutput {
                    key: key.to_string(),
                    file: file.display().to_string(),
                    size_bytes: size,
                });
            } else {
                formatter.success(&format!(
                    "{path} -> {} ({})",
                    file.display(),
                    format_size(size as i64)
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            ExitCode::GeneralError
        }
    }
}

async fn copy_to_stdout(mut body: ObjectBody) -> anyhow::Result<u64> {
    let mut stdout = tokio::io::stdout();
    let size = tokio::io::copy(&mut body, &mut stdout)
        .await
        .context("Failed to stream object to stdout")?;
    stdout.flush().await.context("Failed to flush stdout")?;
    Ok(size)
}

async fn copy_to_file(mut body: ObjectBody, file: &Path) -> anyhow::Result<u64> {
    let mut out = tokio::fs::File::create(file)
        .await
        .with_context(|| format!("Failed to create {}", file.display()))?;
    let size = tokio::io::copy(&mut body, &mut out)
        .await
        .with_context(|| format!("Failed to write {}", file.display()))?;
    out.flush()
        .await
        .with_context(|| format!("Failed to flush {}", file.display()))?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_to_file_writes_body() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.bin");
        let body: ObjectBody = Box::pin(std::io::Cursor::new(b"hello".to_vec()));

        let size = copy_to_file(body, &file).await.unwrap();
        assert_eq!(size, 5);
        assert_eq!(std::fs::read(&file).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_copy_to_file_reports_path() {
        let body: ObjectBody = Box::pin(std::io::Cursor::new(Vec::new()));
        let err = copy_to_file(body, Path::new("/nonexistent/dir/out.bin"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/dir/out.bin"));
    }
}
