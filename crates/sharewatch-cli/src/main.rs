use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "sharewatch",
    version,
    about = "Audit external sharing (guest invitations, anonymous links) in a cloud office tenant"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter sharewatch.yaml into a project directory.
    Init {
        /// Target directory (created if absent)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing sharewatch.yaml
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Validate a configuration file without touching the tenant.
    Check {
        /// Path to the configuration file
        #[arg(long, default_value = "sharewatch.yaml")]
        config: PathBuf,
    },

    /// Query the audit log and write the sharing report.
    Run(commands::run::RunArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Init { dir, force } => commands::init::execute(&dir, force),
        Command::Check { config } => commands::check::execute(&config),
        Command::Run(args) => commands::run::execute(args).await,
    }
}
