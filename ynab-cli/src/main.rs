use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod api;
mod config;
mod logging;
mod push;
mod state;
mod webhook;

use push::PushArgs;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("YNAB_PUSH_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "ynab-push", version = VERSION, about = "Push bank CSV statements to YNAB")]
struct Cli {
    /// Config file (default: ~/.ynab-push/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output: debug logs and the converted transactions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a statement and push it to a budget
    Push {
        /// CSV file to parse
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Budget ID (falls back to api.budget_id)
        #[arg(short = 'b', long)]
        budget: Option<String>,

        /// Account ID (falls back to api.account_id)
        #[arg(short = 'a', long)]
        account: Option<String>,

        /// API token
        #[arg(short = 't', long)]
        token: String,

        /// Webhook notified with the reconciled balance (falls back to webhook.url)
        #[arg(long)]
        webhook: Option<String>,
    },

    /// Convert a statement and print the request body, without pushing
    Convert {
        /// CSV file to parse
        #[arg(short = 'f', long)]
        file: PathBuf,

        /// Account ID (falls back to api.account_id)
        #[arg(short = 'a', long)]
        account: Option<String>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let config_file = cli.config.as_deref();

    match cli.command {
        Command::Push {
            file,
            budget,
            account,
            token,
            webhook,
        } => {
            let cfg = config::load_config(config_file)?;
            let args = PushArgs {
                file,
                budget_id: budget
                    .or_else(|| cfg.api.budget_id.clone())
                    .context("missing budget ID (pass -b or set api.budget_id)")?,
                account_id: account
                    .or_else(|| cfg.api.account_id.clone())
                    .context("missing account ID (pass -a or set api.account_id)")?,
                token,
                webhook: webhook.or_else(|| cfg.webhook.url.clone()),
                verbose: cli.verbose,
            };

            let http = reqwest::Client::new();
            push::run_push(&args, &cfg, &http, &mut std::io::stdout()).await?;
        }

        Command::Convert { file, account } => {
            let cfg = config::load_config(config_file)?;
            let account_id = account
                .or_else(|| cfg.api.account_id.clone())
                .context("missing account ID (pass -a or set api.account_id)")?;
            push::run_convert(&file, &account_id, &cfg, &mut std::io::stdout())?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config(config_file)?;
            }
            ConfigCommand::Show => {
                let cfg = config::load_config(config_file)?;
                println!("# {}", config::config_path(config_file)?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
