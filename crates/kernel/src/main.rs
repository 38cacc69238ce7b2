//! Navgate CLI
//!
//! Loads a menu configuration and prints navigation trees, permission
//! summaries, validation results and the route table as JSON.
//!
//! Usage:
//!   navgate nav --route lesxon.view --grant lesxon_view,products_all
//!   navgate summary --full-access lesxon,products
//!   navgate check --config menu.toml

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use navgate_kernel::defaults::{default_store, grant_all};
use navgate_kernel::models::{PermissionSet, User};
use navgate_kernel::{Config, ConfigurationStore, Navigator};

/// Module-visibility and permission-resolution engine.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Menu configuration file (overrides NAVGATE_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Home module name (overrides NAVGATE_HOME_MODULE).
    #[arg(long, global = true)]
    home: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the navigation tree for a route and caller.
    Nav {
        /// Current logical route (e.g. lesxon.view).
        #[arg(long, conflicts_with = "path")]
        route: Option<String>,

        /// Current request path, resolved through the route index.
        #[arg(long)]
        path: Option<String>,

        #[command(flatten)]
        caller: CallerArgs,
    },
    /// Print per-module permission summaries.
    Summary {
        /// Only summarize this module.
        #[arg(long)]
        module: Option<String>,

        #[command(flatten)]
        caller: CallerArgs,
    },
    /// Validate the configuration.
    Check,
    /// Print the route table.
    Routes,
}

/// Who is asking.
#[derive(Args, Debug)]
struct CallerArgs {
    /// Render for an anonymous caller.
    #[arg(long, conflicts_with_all = ["grant", "full_access"])]
    anonymous: bool,

    /// Permissions to grant (comma-separated).
    #[arg(long, value_delimiter = ',')]
    grant: Vec<String>,

    /// Grant every permission of these modules (comma-separated).
    #[arg(long, value_delimiter = ',')]
    full_access: Vec<String>,
}

impl CallerArgs {
    fn user(&self, store: &ConfigurationStore) -> Option<User> {
        if self.anonymous {
            return None;
        }

        let mut permissions: PermissionSet =
            grant_all(store, self.full_access.iter().map(|m| m.as_str()));
        for permission in &self.grant {
            permissions.grant(permission.trim());
        }

        Some(User::new(Uuid::now_v7(), permissions))
    }
}

#[derive(Serialize)]
struct CheckOutput {
    modules: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct RouteOutput<'a> {
    route: &'a str,
    url: &'a str,
    module: &'a str,
    permission: Option<&'a str>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(path) = cli.config {
        config.menu_config = Some(path);
    }
    if let Some(home) = cli.home {
        config.home_module = home;
    }

    let store = load_store(&config)?;
    let navigator = Navigator::with_home(store, config.home_module.clone());

    match cli.command {
        Command::Nav {
            route,
            path,
            caller,
        } => {
            let user = caller.user(navigator.store());
            let nodes = match path {
                Some(path) => navigator.build_navigation_for_path(&path, user.as_ref()),
                None => navigator.build_navigation(route.as_deref(), user.as_ref()),
            };
            print_json(&nodes)
        }
        Command::Summary { module, caller } => {
            let user = caller.user(navigator.store());
            match module {
                Some(module) => {
                    let summary = navigator
                        .module_permission_summary(user.as_ref(), &module)
                        .with_context(|| format!("module '{module}' is not defined"))?;
                    print_json(&summary)
                }
                None => print_json(&navigator.permission_summary(user.as_ref())),
            }
        }
        Command::Routes => {
            let routes: Vec<_> = navigator
                .routes()
                .entries()
                .map(|e| RouteOutput {
                    route: &e.route,
                    url: &e.url,
                    module: &e.module,
                    permission: e.permission.as_deref(),
                })
                .collect();
            print_json(&routes)
        }
        Command::Check => run_check(navigator.store(), config.strict),
    }
}

fn load_store(config: &Config) -> Result<ConfigurationStore> {
    match &config.menu_config {
        Some(path) => {
            let store = ConfigurationStore::from_path(path)
                .with_context(|| format!("failed to load menu config {}", path.display()))?;
            if config.strict && !store.validate().is_clean() {
                bail!("menu config {} has warnings and NAVGATE_STRICT is set", path.display());
            }
            info!(path = %path.display(), modules = store.len(), "menu config loaded");
            Ok(store)
        }
        None => {
            info!("no menu config given; using built-in reference menu");
            Ok(default_store())
        }
    }
}

fn run_check(store: &ConfigurationStore, strict: bool) -> Result<()> {
    let report = store.validate();

    let output = CheckOutput {
        modules: store.len(),
        errors: report.errors().map(|e| e.to_string()).collect(),
        warnings: report.warnings().map(|w| w.to_string()).collect(),
    };
    print_json(&output)?;

    if !output.errors.is_empty() {
        bail!("menu config has {} error(s)", output.errors.len());
    }
    if strict && !output.warnings.is_empty() {
        warn!(warnings = output.warnings.len(), "strict mode rejects warnings");
        bail!("menu config has {} warning(s) in strict mode", output.warnings.len());
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
