//! Alias management commands
//!
//! Aliases are named references to S3-compatible storage endpoints,
//! including connection details and credentials.

use bkt_core::{Alias, AliasManager, BucketLookup, RetryConfig, TimeoutConfig};
use clap::Subcommand;
use serde::Serialize;

use super::fail;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Alias subcommands for managing storage service connections
#[derive(Subcommand, Debug)]
pub enum AliasCommands {
    /// Add or update an alias
    Set(SetArgs),

    /// List all configured aliases
    List(ListArgs),

    /// Remove an alias
    Remove(RemoveArgs),
}

/// Arguments for the `alias set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Alias name (e.g., "local", "aws")
    pub name: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Endpoint URL; omit to use the AWS regional endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Region used for signing
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Bucket lookup style: auto, path, or dns
    #[arg(long, default_value = "auto")]
    pub bucket_lookup: BucketLookup,

    /// Maximum attempts per request, including the first one
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Overall per-operation timeout in milliseconds
    #[arg(long)]
    pub operation_timeout_ms: Option<u64>,
}

/// Arguments for the `alias list` command
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show full details including region and lookup style
    #[arg(short, long)]
    pub long: bool,
}

/// Arguments for the `alias remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the alias to remove
    pub name: String,
}

#[derive(Serialize)]
struct AliasListOutput {
    aliases: Vec<AliasInfo>,
}

/// Alias information for output, without credentials
#[derive(Serialize)]
struct AliasInfo {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    region: String,
    bucket_lookup: BucketLookup,
}

impl From<&Alias> for AliasInfo {
    fn from(alias: &Alias) -> Self {
        Self {
            name: alias.name.clone(),
            endpoint: alias.endpoint.clone(),
            region: alias.region.clone(),
            bucket_lookup: alias.bucket_lookup,
        }
    }
}

#[derive(Serialize)]
struct AliasOperationOutput {
    success: bool,
    alias: String,
}

/// Execute an alias subcommand
pub fn execute(cmd: AliasCommands, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match AliasManager::new() {
        Ok(am) => am,
        Err(e) => return fail(&formatter, "Failed to load aliases", &e),
    };

    match cmd {
        AliasCommands::Set(args) => execute_set(args, &manager, &formatter),
        AliasCommands::List(args) => execute_list(args, &manager, &formatter),
        AliasCommands::Remove(args) => execute_remove(args, &manager, &formatter),
    }
}

fn build_alias(args: SetArgs) -> Alias {
    let mut alias = Alias::new(args.name, args.endpoint, args.access_key, args.secret_key);
    alias.region = args.region;
    alias.bucket_lookup = args.bucket_lookup;
    if let Some(max_attempts) = args.max_attempts {
        alias.retry = Some(RetryConfig {
            max_attempts,
            ..Default::default()
        });
    }
    if let Some(ms) = args.operation_timeout_ms {
        alias.timeout = Some(TimeoutConfig {
            operation_ms: Some(ms),
            ..Default::default()
        });
    }
    alias
}

fn execute_set(args: SetArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    let alias = build_alias(args);
    let name = alias.name.clone();

    match manager.set(alias) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AliasOperationOutput {
                    success: true,
                    alias: name,
                });
            } else {
                formatter.success(&format!("Alias '{name}' configured."));
            }
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to save alias", &e),
    }
}

fn execute_list(args: ListArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    let aliases = match manager.list() {
        Ok(aliases) => aliases,
        Err(e) => return fail(formatter, "Failed to load aliases", &e),
    };

    if formatter.is_json() {
        formatter.json(&AliasListOutput {
            aliases: aliases.iter().map(AliasInfo::from).collect(),
        });
    } else if aliases.is_empty() {
        formatter.println("No aliases configured.");
    } else {
        for alias in &aliases {
            let endpoint = alias.endpoint.as_deref().unwrap_or("(aws)");
            if args.long {
                formatter.println(&format!(
                    "{:<12} {} (region: {}, lookup: {})",
                    alias.name, endpoint, alias.region, alias.bucket_lookup
                ));
            } else {
                formatter.println(&format!("{:<12} {endpoint}", alias.name));
            }
        }
    }
    ExitCode::Success
}

fn execute_remove(args: RemoveArgs, manager: &AliasManager, formatter: &Formatter) -> ExitCode {
    match manager.remove(&args.name) {
        Ok(()) => {
            if formatter.is_json() {
                formatter.json(&AliasOperationOutput {
                    success: true,
                    alias: args.name,
                });
            } else {
                formatter.success(&format!("Alias '{}' removed.", args.name));
            }
            ExitCode::Success
        }
        Err(e) => fail(formatter, "Failed to remove alias", &e),
    }
}
