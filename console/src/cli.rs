//! CLI argument definitions and the entry point.
//!
//! Commands:
//! - billing-console health | plans
//! - billing-console create-user --email <email>
//! - billing-console subscribe --user-id <id> --plan <basic|pro|ent>
//! - billing-console usage --user-id <id> --metric <name> --quantity <n>
//! - billing-console generate-invoice | invoices | payments --user-id <id>
//! - billing-console shell

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use billing_core::screens::PLAN_CHOICES;
use billing_core::{Api, BillingClient, Config};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::Session;
use crate::shell;
use crate::transport::UreqTransport;

/// Operator console for the billing service
#[derive(Parser, Debug)]
#[command(name = "billing-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the billing API
    #[arg(long, global = true, env = "BILLING_API_BASE")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session that keeps screen state between actions
    Shell,

    #[command(flatten)]
    Action(Action),
}

/// One operator action. Omitted inputs keep the screen's current value.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Check the API's health endpoint
    Health,

    /// Show the plan catalog
    Plans,

    /// Create a user
    CreateUser {
        #[arg(long)]
        email: Option<String>,
    },

    /// Subscribe the created user (or the given user id) to a plan
    Subscribe {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long, value_parser = PLAN_CHOICES)]
        plan: Option<String>,
    },

    /// Record a usage event
    Usage {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        metric: Option<String>,
        #[arg(long)]
        quantity: Option<i64>,
    },

    /// Generate an invoice for a user
    GenerateInvoice {
        #[arg(long)]
        user_id: Option<String>,
    },

    /// List a user's invoices
    Invoices {
        #[arg(long)]
        user_id: Option<String>,
    },

    /// List a user's payments
    Payments {
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Redisplay a screen without calling the API
    Show { screen: Screen },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Plans,
    Users,
    Billing,
    Invoices,
    Payments,
}

/// Parse arguments, run the command, and map a failed action to a non-zero
/// exit code.
pub fn run() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let config = Config::new(cli.api_base);
    info!(api_base = %config.api_base, "billing console starting");
    let api = Api::new(BillingClient::new(&config.api_base), UreqTransport::new());
    let mut session = Session::new(api, &config.api_base);

    match cli.command {
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(&mut session, stdin.lock(), io::stdout())
                .context("interactive shell failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Action(action) => {
            let outcome = session.run(action);
            println!("{}", outcome.screen);
            Ok(if outcome.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}
