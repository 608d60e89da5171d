//! Command line node for the denomination factory.

use anyhow::Result;
use colored::Colorize;
use factory_cli::commands::{fund, genesis, query, tx};
use factory_cli::CliConfig;
use factory_core::events::Event;
use factory_core::types::Coin;
use factory_core::{Msg, MsgResponse, Query};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the node.
#[derive(Debug, StructOpt)]
#[structopt(name = "factoryd", about = "Denomination factory node")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Directory holding the database
    #[structopt(short, long, parse(from_os_str))]
    data_dir: Option<PathBuf>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the node.
#[derive(Debug, StructOpt)]
enum Command {
    /// Import a genesis file into an empty database
    #[structopt(name = "init")]
    Init {
        /// Genesis file
        #[structopt(long, parse(from_os_str))]
        genesis: PathBuf,
    },

    /// Export the current state as genesis
    #[structopt(name = "export")]
    Export {
        /// Output file, stdout if omitted
        #[structopt(long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Credit native coins to an account
    #[structopt(name = "fund")]
    Fund {
        /// Account to credit
        #[structopt(long)]
        address: String,

        /// Coins, e.g. 150uosmo,10stake
        #[structopt(long)]
        coins: String,
    },

    /// Create a new factory denom
    #[structopt(name = "create-denom")]
    CreateDenom {
        /// Creator paying the fee
        #[structopt(long)]
        from: String,

        /// Subdenom
        #[structopt(long)]
        subdenom: String,
    },

    /// Mint a factory denom to its admin
    #[structopt(name = "mint")]
    Mint {
        /// Admin of the denom
        #[structopt(long)]
        from: String,

        /// Amount, e.g. 10factory/alice/bitcoin
        #[structopt(long)]
        amount: Coin,
    },

    /// Burn a factory denom from its admin
    #[structopt(name = "burn")]
    Burn {
        /// Admin of the denom
        #[structopt(long)]
        from: String,

        /// Amount, e.g. 10factory/alice/bitcoin
        #[structopt(long)]
        amount: Coin,
    },

    /// Hand admin rights to another account
    #[structopt(name = "change-admin")]
    ChangeAdmin {
        /// Current admin
        #[structopt(long)]
        from: String,

        /// The denom
        #[structopt(long)]
        denom: String,

        /// New admin; empty to orphan the denom
        #[structopt(long, default_value = "")]
        new_admin: String,
    },

    /// Set or clear the before-send hook of a denom
    #[structopt(name = "set-before-send-hook")]
    SetBeforeSendHook {
        /// Current admin
        #[structopt(long)]
        from: String,

        /// The denom
        #[structopt(long)]
        denom: String,

        /// Hook address; empty to clear
        #[structopt(long, default_value = "")]
        hook: String,
    },

    /// Read registry state
    #[structopt(name = "query")]
    Query(QueryCommand),
}

/// Queries.
#[derive(Debug, StructOpt)]
enum QueryCommand {
    /// Authority record of a denom
    #[structopt(name = "denom-authority-metadata")]
    DenomAuthorityMetadata { denom: String },

    /// Denoms created by an address
    #[structopt(name = "denoms-from-creator")]
    DenomsFromCreator { creator: String },

    /// Before-send hook of a denom
    #[structopt(name = "denom-before-send-hook")]
    DenomBeforeSendHook { denom: String },

    /// Module parameters
    #[structopt(name = "params")]
    Params,

    /// Balance of an account
    #[structopt(name = "balance")]
    Balance { address: String, denom: String },
}

fn print_tx(result: &tx::TxResult) {
    match &result.response {
        MsgResponse::CreateDenom { new_token_denom } => {
            println!("{} {}", "Denom created:".green(), new_token_denom)
        }
        MsgResponse::Empty => println!("{}", "Transaction applied".green()),
    }
    for event in &result.events {
        print_event(event);
    }
}

fn print_event(event: &Event) {
    println!("  {} {}", event.event_type().cyan(), event);
}

fn main() -> Result<()> {
    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = match &opt.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    // Override data directory if specified
    if let Some(data_dir) = opt.data_dir {
        config.data_dir = data_dir;
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Run the appropriate command
    match opt.cmd {
        Command::Init { genesis: file } => {
            let denoms = genesis::init(&config, &file)?;
            println!(
                "{} {} ({} denoms)",
                "Genesis imported:".green(),
                config.data_dir.display(),
                denoms
            );
        }
        Command::Export { output } => {
            let exported = genesis::export(&config, output.as_deref())?;
            match output {
                Some(_) => println!("{} {}", "Genesis exported:".green(), exported),
                None => println!("{}", exported),
            }
        }
        Command::Fund { address, coins } => {
            let coins = fund::run(&config, &address, &coins)?;
            let coins: Vec<String> = coins.iter().map(Coin::to_string).collect();
            println!("{} {} {}", "Funded:".green(), address, coins.join(","));
        }
        Command::CreateDenom { from, subdenom } => {
            let msg = Msg::CreateDenom {
                sender: from,
                subdenom,
            };
            print_tx(&tx::run(&config, msg)?);
        }
        Command::Mint { from, amount } => {
            let msg = Msg::Mint {
                sender: from,
                amount,
            };
            print_tx(&tx::run(&config, msg)?);
        }
        Command::Burn { from, amount } => {
            let msg = Msg::Burn {
                sender: from,
                amount,
            };
            print_tx(&tx::run(&config, msg)?);
        }
        Command::ChangeAdmin {
            from,
            denom,
            new_admin,
        } => {
            let msg = Msg::ChangeAdmin {
                sender: from,
                denom,
                new_admin,
            };
            print_tx(&tx::run(&config, msg)?);
        }
        Command::SetBeforeSendHook { from, denom, hook } => {
            let msg = Msg::SetBeforeSendHook {
                sender: from,
                denom,
                before_send_hook_address: hook,
            };
            print_tx(&tx::run(&config, msg)?);
        }
        Command::Query(cmd) => {
            let output = match cmd {
                QueryCommand::DenomAuthorityMetadata { denom } => {
                    query::run(&config, &Query::DenomAuthorityMetadata { denom })?
                }
                QueryCommand::DenomsFromCreator { creator } => {
                    query::run(&config, &Query::DenomsFromCreator { creator })?
                }
                QueryCommand::DenomBeforeSendHook { denom } => {
                    query::run(&config, &Query::BeforeSendHookAddress { denom })?
                }
                QueryCommand::Params => query::run(&config, &Query::Params)?,
                QueryCommand::Balance { address, denom } => {
                    query::balance(&config, &address, &denom)?
                }
            };
            println!("{}", output);
        }
    }

    Ok(())
}
