//! Resource Gateway CLI
//!
//! Issues authenticated calls against the resource-management backend
//! through the same pipeline a UI would use.
//!
//! ```text
//! resource-gateway --token $T resources
//!     → config (file or defaults, --url override)
//!     → SessionStore::init(user, token)
//!     → Gateway → XxxService call
//!     → pretty JSON on stdout | "kind: message" on stderr
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use resource_gateway::config::{load_config, validate_config, GatewayConfig};
use resource_gateway::failure::{FailureKind, GatewayResult, NormalizedFailure};
use resource_gateway::http::Gateway;
use resource_gateway::observability::{logging, metrics};
use resource_gateway::services::{
    BudgetService, OrganizationService, ResourceGroupService, ResourceService, SubscriptionService,
};
use resource_gateway::session::{Identity, Navigator, RecordingNavigator, SessionStore, SignInRedirect};

#[derive(Parser)]
#[command(name = "resource-gateway")]
#[command(about = "Authenticated CLI for the resource-management API", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides api.base_url
    #[arg(short, long)]
    url: Option<String>,

    /// Bearer token used to seed the session
    #[arg(short, long, env = "GATEWAY_TOKEN")]
    token: Option<String>,

    /// Username shown for the seeded session
    #[arg(long, default_value = "cli")]
    user: String,

    /// User id for the seeded session; defaults to the username
    #[arg(long)]
    user_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resources
    Resources,
    /// List resource groups
    ResourceGroups,
    /// List budgets, or show the overview of one month (YYYY-MM)
    Budgets { month: Option<String> },
    /// List recurring subscriptions
    Subscriptions,
    /// List organization members
    Users,
    /// Show the logs of a resource
    Logs { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("Error: failed to initialize logging: {e}");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let session = SessionStore::new();
    let navigator = Arc::new(RecordingNavigator::new("/"));
    session.register(Arc::new(SignInRedirect::new(
        navigator.clone(),
        config.navigation.signin_route.clone(),
    )));
    session.init(seed_identity(&cli), cli.token.clone());

    let gateway = match Gateway::new(&config, session) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let outcome = run(cli.command, gateway).await;

    if navigator.current_route() == config.navigation.signin_route {
        eprintln!("Session rejected; sign in again to obtain a new token.");
    }

    match outcome {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("Error ({}): {}", failure.kind, failure.message);
            ExitCode::FAILURE
        }
    }
}

/// Identity paired with `--token`; none without a token.
fn seed_identity(cli: &Cli) -> Option<Identity> {
    cli.token.as_ref()?;
    let id = cli.user_id.clone().unwrap_or_else(|| cli.user.clone());
    Some(Identity::new(id, cli.user.clone()))
}

fn resolve_config(cli: &Cli) -> Result<GatewayConfig, String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => GatewayConfig::default(),
    };
    if let Some(url) = &cli.url {
        config.api.base_url = url.clone();
        validate_config(&config).map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })?;
    }
    Ok(config)
}

async fn run(command: Commands, gateway: Gateway) -> GatewayResult<String> {
    match command {
        Commands::Resources => render(ResourceService::new(gateway).list().await?),
        Commands::ResourceGroups => render(ResourceGroupService::new(gateway).list().await?),
        Commands::Budgets { month: None } => render(BudgetService::new(gateway).list().await?),
        Commands::Budgets { month: Some(month) } => {
            render(BudgetService::new(gateway).overview(&month).await?)
        }
        Commands::Subscriptions => render(SubscriptionService::new(gateway).list().await?),
        Commands::Users => render(OrganizationService::new(gateway).list_users().await?),
        Commands::Logs { id } => Ok(ResourceService::new(gateway).logs(&id).await?.logs),
    }
}

fn render<T: Serialize>(value: T) -> GatewayResult<String> {
    serde_json::to_string_pretty(&value).map_err(|e| {
        NormalizedFailure::new(
            0,
            format!("Failed to render output: {e}"),
            FailureKind::MalformedResponse,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("resource-gateway").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_seed_identity_uses_explicit_user_id() {
        let cli = parse(&["--token", "T1", "--user", "alice", "--user-id", "u-42", "resources"]);
        assert_eq!(seed_identity(&cli), Some(Identity::new("u-42", "alice")));
    }

    #[test]
    fn test_seed_identity_falls_back_to_username() {
        let cli = parse(&["--token", "T1", "--user", "alice", "resources"]);
        assert_eq!(seed_identity(&cli), Some(Identity::new("alice", "alice")));
    }

    #[test]
    fn test_no_identity_without_token() {
        let cli = parse(&["--user-id", "u-42", "resources"]);
        if cli.token.is_none() {
            assert_eq!(seed_identity(&cli), None);
        }
    }
}
