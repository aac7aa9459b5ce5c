//! CLI command definitions and execution
//!
//! Every object command resolves `alias/bucket[/key]` to a [`Bucket`] handle
//! and calls exactly one bucket operation (or a loop of them for paging and
//! batched deletes).

use std::sync::Arc;

use bkt_core::{AliasManager, Bucket, Error, RemotePath};
use bkt_s3::S3Client;
use clap::{Parser, Subcommand};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod alias;
mod completions;
mod cp;
mod exists;
mod get;
mod ls;
mod presign;
mod put;
mod rm;
mod stat;

/// bkt - bucket-scoped S3 client
///
/// Talks to AWS S3 and S3-compatible services through named aliases.
#[derive(Parser, Debug)]
#[command(name = "bkt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage storage service aliases
    #[command(subcommand)]
    Alias(alias::AliasCommands),

    /// Download an object to stdout or a file
    Get(get::GetArgs),

    /// Upload a local file as an object
    Put(put::PutArgs),

    /// Show object metadata
    Stat(stat::StatArgs),

    /// Check whether an object exists (exit 0 if it does, 5 if not)
    Exists(exists::ExistsArgs),

    /// Remove objects
    Rm(rm::RmArgs),

    /// List objects or object versions
    Ls(ls::LsArgs),

    /// Copy an object within its bucket
    Cp(cp::CpArgs),

    /// Generate a presigned download URL
    Presign(presign::PresignArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Alias(cmd) => alias::execute(cmd, output_config),
        Commands::Get(args) => get::execute(args, output_config).await,
        Commands::Put(args) => put::execute(args, output_config).await,
        Commands::Stat(args) => stat::execute(args, output_config).await,
        Commands::Exists(args) => exists::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Cp(args) => cp::execute(args, output_config).await,
        Commands::Presign(args) => presign::execute(args, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Resolve the alias of `path` and bind a handle to its bucket
async fn open_bucket(path: &RemotePath) -> bkt_core::Result<Bucket> {
    let alias = AliasManager::new()?.get(&path.alias)?;
    let client = S3Client::new(&alias).await?;
    Ok(Bucket::new(Arc::new(client), path.bucket.clone()))
}

/// Parse `raw` and open its bucket, reporting failures
async fn resolve(raw: &str, formatter: &Formatter) -> Result<(RemotePath, Bucket), ExitCode> {
    let path = bkt_core::parse_path(raw).map_err(|e| fail(formatter, "Invalid path", &e))?;
    let bucket = open_bucket(&path)
        .await
        .map_err(|e| fail(formatter, "Failed to open bucket", &e))?;
    Ok((path, bucket))
}

/// Print `err` with some context and pick the matching exit code
fn fail(formatter: &Formatter, context: &str, err: &Error) -> ExitCode {
    formatter.error(&format!("{context}: {err}"));
    ExitCode::from(err)
}
