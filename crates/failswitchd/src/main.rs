//! failswitchd — the FailSwitch handler binary.
//!
//! Runs as an AWS Lambda function by default: each invocation receives an
//! alarm state-change event and repoints the configured API Gateway
//! integration. The `invoke` subcommand runs a single event locally.
//!
//! # Usage
//!
//! ```text
//! REGION=us-east-1 S3_BUCKET_NAME=routing S3_FILE_KEY=alarms.json failswitchd
//! failswitchd --region us-east-1 --bucket routing-config --key alarms.json \
//!     invoke --event demos/alarm-event.json --config-root demos/config --dry-run
//! ```

mod invoke;
mod lambda;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use failswitch_aws::{ApiGatewayClient, S3ObjectStore};
use failswitch_core::{
    ConfigLocation, ConfigRepository, FsObjectStore, ObjectStore, Orchestrator, RouteSwitcher,
};
use tracing::info;

const DEFAULT_FILTER: &str = "info,failswitchd=debug,failswitch_core=debug,failswitch_aws=debug";

#[derive(Parser)]
#[command(name = "failswitchd", about = "Alarm-driven API Gateway route switch")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Process configuration. All three values are required.
#[derive(Args, Debug, Clone)]
struct Settings {
    /// AWS region of the managed API and the configuration bucket.
    #[arg(
        long,
        env = "REGION",
        value_name = "REGION",
        value_parser = NonEmptyStringValueParser::new()
    )]
    region: String,

    /// Bucket holding the routing configuration document.
    #[arg(
        long,
        env = "S3_BUCKET_NAME",
        value_name = "S3_BUCKET_NAME",
        value_parser = NonEmptyStringValueParser::new()
    )]
    bucket: String,

    /// Object key of the routing configuration document.
    #[arg(
        long,
        env = "S3_FILE_KEY",
        value_name = "S3_FILE_KEY",
        value_parser = NonEmptyStringValueParser::new()
    )]
    key: String,
}

#[derive(Subcommand)]
enum Command {
    /// Run the Lambda runtime loop (the default).
    Serve,

    /// Handle one alarm event read from a file and exit.
    Invoke {
        /// Path to the alarm event JSON.
        #[arg(long)]
        event: PathBuf,

        /// Serve the routing document from DIR/<bucket>/<key> instead of S3.
        #[arg(long, value_name = "DIR")]
        config_root: Option<PathBuf>,

        /// Resolve and print the switch without calling API Gateway.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let orchestrator = build_orchestrator(&cli.settings, None).await;
            lambda::serve(orchestrator).await
        }
        Command::Invoke {
            event,
            config_root,
            dry_run,
        } => {
            let orchestrator = build_orchestrator(&cli.settings, config_root.as_deref()).await;
            invoke::run(&orchestrator, &event, dry_run).await
        }
    }
}

/// JSON lines without timestamps inside Lambda (CloudWatch stamps each
/// line), human-readable output elsewhere.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    if std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Bind the collaborators once; every invocation reuses them.
async fn build_orchestrator(settings: &Settings, config_root: Option<&Path>) -> Orchestrator {
    let sdk_config = failswitch_aws::load_sdk_config(&settings.region).await;

    let store: Arc<dyn ObjectStore> = match config_root {
        Some(root) => {
            info!(root = ?root, "reading routing configuration from local directory");
            Arc::new(FsObjectStore::new(root))
        }
        None => Arc::new(S3ObjectStore::new(&sdk_config)),
    };

    let location = ConfigLocation::new(&settings.bucket, &settings.key);
    info!(
        region = %settings.region,
        bucket = %location.bucket,
        key = %location.key,
        "failswitch configured"
    );

    Orchestrator::new(
        ConfigRepository::new(store, location),
        RouteSwitcher::new(Arc::new(ApiGatewayClient::new(&sdk_config)), &settings.region),
    )
}
