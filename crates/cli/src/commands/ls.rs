//! ls command - List objects or object versions
//!
//! Pages are printed as they arrive. Ctrl-C cancels the listing between
//! pages and exits with status 130.

use bkt_core::option::{list_v2, list_versions};
use bkt_core::{DeleteMarker, ObjectSummary, ObjectVersion, RemotePath};
use clap::Args;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{fail, resolve};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, format_size, format_timestamp};

/// List objects or object versions
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Remote path (alias/bucket[/prefix])
    pub path: String,

    /// List every version and delete marker
    #[arg(long)]
    pub versions: bool,

    /// Group keys by this delimiter
    #[arg(long, default_value = "/")]
    pub delimiter: String,

    /// List recursively (no delimiter)
    #[arg(short, long)]
    pub recursive: bool,

    /// Keys per page
    #[arg(long)]
    pub max_keys: Option<i32>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,
}

impl LsArgs {
    fn delimiter(&self) -> Option<String> {
        (!self.recursive && !self.delimiter.is_empty()).then(|| self.delimiter.clone())
    }
}

/// Counts pages and decides when to stop
#[derive(Debug, Default)]
struct PageLimit {
    max_pages: Option<usize>,
    seen: usize,
    truncated: bool,
}

impl PageLimit {
    fn new(max_pages: Option<usize>) -> Self {
        Self {
            max_pages,
            ..Default::default()
        }
    }

    /// Record a page; returns whether the next one should be fetched
    fn next(&mut self, last: bool) -> bool {
        self.seen += 1;
        if last {
            return false;
        }
        if self.max_pages.is_some_and(|max| self.seen >= max) {
            self.truncated = true;
            return false;
        }
        true
    }
}

#[derive(Debug, Default, Serialize)]
struct LsOutput {
    objects: Vec<ObjectSummary>,
    prefixes: Vec<String>,
    truncated: bool,
}

#[derive(Debug, Default, Serialize)]
struct LsVersionsOutput {
    versions: Vec<ObjectVersion>,
    delete_markers: Vec<DeleteMarker>,
    prefixes: Vec<String>,
    truncated: bool,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if args.max_pages == Some(0) {
        formatter.error("--max-pages must be at least 1");
        return ExitCode::UsageError;
    }

    let (path, bucket) = match resolve(&args.path, &formatter).await {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("interrupt received, cancelling listing");
                cancel.cancel();
            }
        }
    });

    let result = if args.versions {
        list_versions(&bucket, &cancel, &path, &args, &formatter).await
    } else {
        list_objects(&bucket, &cancel, &path, &args, &formatter).await
    };
    interrupt.abort();

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => fail(&formatter, &format!("Failed to list {path}"), &e),
    }
}

async fn list_objects(
    bucket: &bkt_core::Bucket,
    cancel: &CancellationToken,
    path: &RemotePath,
    args: &LsArgs,
    formatter: &Formatter,
) -> bkt_core::Result<()> {
    let mut opts = Vec::new();
    if let Some(delimiter) = args.delimiter() {
        opts.push(list_v2::delimiter(delimiter));
    }
    if let Some(max_keys) = args.max_keys {
        opts.push(list_v2::max_keys(max_keys));
    }

    let mut limit = PageLimit::new(args.max_pages);
    let mut output = LsOutput::default();

    bucket
        .list_objects_v2_pages(
            cancel,
            &path.key,
            |page, last| {
                if formatter.is_json() {
                    output.prefixes.extend(page.common_prefixes.iter().cloned());
                    output.objects.extend(page.contents.iter().cloned());
                } else {
                    for prefix in &page.common_prefixes {
                        formatter.println(&format_prefix(prefix));
                    }
                    for object in &page.contents {
                        formatter.println(&format_object(object));
                    }
                }
                limit.next(last)
            },
            opts,
        )
        .await?;

    if formatter.is_json() {
        output.truncated = limit.truncated;
        formatter.json(&output);
    } else if limit.truncated {
        formatter.warning(&format!("Stopped after {} page(s)", limit.seen));
    }
    Ok(())
}

async fn list_versions(
    bucket: &bkt_core::Bucket,
    cancel: &CancellationToken,
    path: &RemotePath,
    args: &LsArgs,
    formatter: &Formatter,
) -> bkt_core::Result<()> {
    let mut opts = Vec::new();
    if let Some(delimiter) = args.delimiter() {
        opts.push(list_versions::delimiter(delimiter));
    }
    if let Some(max_keys) = args.max_keys {
        opts.push(list_versions::max_keys(max_keys));
    }

    let mut limit = PageLimit::new(args.max_pages);
    let mut output = LsVersionsOutput::default();

    bucket
        .list_object_versions_pages(
            cancel,
            &path.key,
            |page, last| {
                if formatter.is_json() {
                    output.prefixes.extend(page.common_prefixes.iter().cloned());
                    output.versions.extend(page.versions.iter().cloned());
                    output
                        .delete_markers
                        .extend(page.delete_markers.iter().cloned());
                } else {
                    for prefix in &page.common_prefixes {
                        formatter.println(&format_prefix(prefix));
                    }
                    for version in &page.versions {
                        formatter.println(&format_version(version));
                    }
                    for marker in &page.delete_markers {
                        formatter.println(&format_delete_marker(marker));
                    }
                }
                limit.next(last)
            },
            opts,
        )
        .await?;

    if formatter.is_json() {
        output.truncated = limit.truncated;
        formatter.json(&output);
    } else if limit.truncated {
        formatter.warning(&format!("Stopped after {} page(s)", limit.seen));
    }
    Ok(())
}

fn format_prefix(prefix: &str) -> String {
    format!("[{}] {:>10} {prefix}", format_timestamp(None), "PRE")
}

fn format_object(object: &ObjectSummary) -> String {
    format!(
        "[{}] {:>10} {}",
        format_timestamp(object.last_modified),
        format_size(object.size.unwrap_or(0)),
        object.key
    )
}

fn format_version(version: &ObjectVersion) -> String {
    format!(
        "[{}] {:>10} {} {}{}",
        format_timestamp(version.last_modified),
        format_size(version.size.unwrap_or(0)),
        version.key,
        version.version_id.as_deref().unwrap_or("null"),
        if version.is_latest { " (latest)" } else { "" }
    )
}

fn format_delete_marker(marker: &DeleteMarker) -> String {
    format!(
        "[{}] {:>10} {} {}{}",
        format_timestamp(marker.last_modified),
        "DEL",
        marker.key,
        marker.version_id.as_deref().unwrap_or("null"),
        if marker.is_latest { " (latest)" } else { "" }
    )
}
