//! recovery-control: manage Route 53 Recovery Control Config resources
//!
//! Creates, reads, renames, deletes and imports control panels and routing
//! controls, printing the resulting state as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use recovery_control_common::defaults::{
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REGION, DEFAULT_WAIT_TIMEOUT_SECS,
};
use recovery_control_common::schema::schema_for;
use recovery_control_common::{ResourceKind, ResourceSchema};
use recovery_control_provider::aws::{
    AwsContext, FromAwsContext, RecoveryControlClient, find_aws_error,
};
use recovery_control_provider::config::{self, ProviderConfig};
use recovery_control_provider::resource::{
    ControlPanelConfig, ControlPanelResource, Operation, RemoteResource, RoutingControlConfig,
    RoutingControlResource, apply,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "recovery-control")]
#[command(about = "Manage Route 53 Recovery Control Config control panels and routing controls")]
#[command(version)]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

/// Connection and waiter options shared by every command
#[derive(clap::Args, Debug)]
struct GlobalArgs {
    /// AWS region of the Recovery Control Config control plane
    #[arg(long, global = true, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to use (overrides default credential resolution)
    #[arg(long, global = true, env = "AWS_PROFILE")]
    aws_profile: Option<String>,

    /// Override the service endpoint URL
    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    /// Seconds to wait for a create or delete to settle
    #[arg(long, global = true, default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    wait_timeout: u64,

    /// Initial seconds between status checks
    #[arg(long, global = true, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    poll_interval: u64,
}

impl From<GlobalArgs> for ProviderConfig {
    fn from(args: GlobalArgs) -> Self {
        Self {
            aws: config::AwsConfig {
                region: args.region,
                aws_profile: args.aws_profile,
                endpoint_url: args.endpoint_url,
            },
            wait: config::WaitSettings {
                timeout_secs: args.wait_timeout,
                poll_interval_secs: args.poll_interval,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage control panels
    ControlPanel {
        #[command(subcommand)]
        action: ControlPanelAction,
    },

    /// Manage routing controls
    RoutingControl {
        #[command(subcommand)]
        action: RoutingControlAction,
    },

    /// Print attribute schemas as JSON
    Schema {
        /// Only print the schema for this resource kind
        #[arg(long)]
        kind: Option<ResourceKind>,
    },
}

#[derive(Subcommand, Debug)]
enum ControlPanelAction {
    /// Create a control panel and wait until it is deployed
    Create {
        /// ARN of the cluster hosting the panel
        #[arg(long)]
        cluster_arn: String,
        #[arg(long)]
        name: String,
    },
    /// Show the current state of a control panel
    Read {
        #[arg(long)]
        arn: String,
    },
    /// Rename a control panel
    Update {
        #[arg(long)]
        arn: String,
        #[arg(long)]
        cluster_arn: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a control panel and wait until it is gone
    Delete {
        #[arg(long)]
        arn: String,
    },
    /// Adopt an existing control panel by ARN
    Import {
        #[arg(long)]
        arn: String,
    },
}

impl From<ControlPanelAction> for Operation<ControlPanelConfig> {
    fn from(action: ControlPanelAction) -> Self {
        match action {
            ControlPanelAction::Create { cluster_arn, name } => {
                Operation::Create(ControlPanelConfig::new(cluster_arn, name))
            }
            ControlPanelAction::Read { arn } => Operation::Read(arn),
            ControlPanelAction::Update {
                arn,
                cluster_arn,
                name,
            } => Operation::Update(arn, ControlPanelConfig::new(cluster_arn, name)),
            ControlPanelAction::Delete { arn } => Operation::Delete(arn),
            ControlPanelAction::Import { arn } => Operation::Import(arn),
        }
    }
}

#[derive(Subcommand, Debug)]
enum RoutingControlAction {
    /// Create a routing control and wait until it is deployed
    Create {
        /// ARN of the cluster hosting the routing control
        #[arg(long)]
        cluster_arn: String,
        /// Control panel to place it in (default: the cluster's default panel)
        #[arg(long)]
        control_panel_arn: Option<String>,
        #[arg(long)]
        name: String,
    },
    /// Show the current state of a routing control
    Read {
        #[arg(long)]
        arn: String,
    },
    /// Rename a routing control
    Update {
        #[arg(long)]
        arn: String,
        #[arg(long)]
        cluster_arn: String,
        #[arg(long)]
        control_panel_arn: Option<String>,
        #[arg(long)]
        name: String,
    },
    /// Delete a routing control and wait until it is gone
    Delete {
        #[arg(long)]
        arn: String,
    },
    /// Adopt an existing routing control by ARN
    Import {
        #[arg(long)]
        arn: String,
    },
}

impl From<RoutingControlAction> for Operation<RoutingControlConfig> {
    fn from(action: RoutingControlAction) -> Self {
        match action {
            RoutingControlAction::Create {
                cluster_arn,
                control_panel_arn,
                name,
            } => Operation::Create(RoutingControlConfig {
                cluster_arn,
                control_panel_arn,
                name,
            }),
            RoutingControlAction::Read { arn } => Operation::Read(arn),
            RoutingControlAction::Update {
                arn,
                cluster_arn,
                control_panel_arn,
                name,
            } => Operation::Update(
                arn,
                RoutingControlConfig {
                    cluster_arn,
                    control_panel_arn,
                    name,
                },
            ),
            RoutingControlAction::Delete { arn } => Operation::Delete(arn),
            RoutingControlAction::Import { arn } => Operation::Import(arn),
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = find_aws_error(e).and_then(|aws| aws.suggestion()) {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

/// Logs go to stderr so stdout carries only JSON
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,aws_config=warn,aws_smithy_runtime=warn,aws_sdk_route53recoverycontrolconfig=warn",
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Cancel pending waits on Ctrl-C
fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning wait");
            trigger.cancel();
        }
    });
    token
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if let Command::Schema { kind } = args.command {
        let schemas: Vec<ResourceSchema> = match kind {
            Some(kind) => vec![schema_for(kind)],
            None => ResourceKind::iter().map(schema_for).collect(),
        };
        return print_json(&schemas);
    }

    let config: ProviderConfig = args.global.into();
    config.validate()?;

    if let Some(profile) = config.aws_profile() {
        info!(profile = %profile, "Using AWS profile");
    }

    let aws = AwsContext::load(config.region(), config.aws_profile(), config.endpoint_url()).await;
    let api = RecoveryControlClient::from_context(&aws);
    let wait = config.wait.wait_config();
    let cancel = cancel_on_interrupt();

    match args.command {
        Command::ControlPanel { action } => {
            let resource = ControlPanelResource::new(api, wait).with_cancellation(cancel);
            run_operation(&resource, action.into()).await
        }
        Command::RoutingControl { action } => {
            let resource = RoutingControlResource::new(api, wait).with_cancellation(cancel);
            run_operation(&resource, action.into()).await
        }
        Command::Schema { .. } => Ok(()),
    }
}

async fn run_operation<R>(resource: &R, operation: Operation<R::Config>) -> Result<()>
where
    R: RemoteResource,
    R::Attributes: Serialize,
{
    let state = apply(resource, operation).await?;
    if state.is_gone() {
        let kind = R::KIND;
        info!(kind = %kind, "Resource no longer exists");
    }
    print_json(&state)
}
