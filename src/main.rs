use clap::{Parser, Subcommand};
use rand::Rng;
use std::sync::Arc;

use vault_bot::application::errors::{CommandError, StorageError};
use vault_bot::application::messaging::MessageParser;
use vault_bot::application::services::{CommandService, EconomyService};
use vault_bot::domain::entities::{Command, Content, Message, TransferOutcome, User};
use vault_bot::domain::traits::Bot;
use vault_bot::infrastructure::adapters::console::ConsoleAdapter;
use vault_bot::infrastructure::config::Config;
use vault_bot::infrastructure::database::SqliteLedger;

#[derive(Parser)]
#[command(name = "vault-bot")]
#[command(about = "A chat bot with a wallet/vault currency ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("vault-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting vault-bot: {}", config.bot.name);

    // Initialize the ledger store
    if let Some(parent) = config.economy.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::error!("Failed to create database directory: {}", e);
                return;
            }
        }
    }
    let ledger = match SqliteLedger::new(&config.economy.database_path) {
        Ok(ledger) => {
            tracing::info!("Ledger store initialized at {:?}", config.economy.database_path);
            Arc::new(ledger)
        }
        Err(e) => {
            tracing::error!("Failed to initialize ledger store: {}", e);
            return;
        }
    };

    // Economy service gets its ledger by injection
    let economy = Arc::new(EconomyService::new(ledger, config.account_defaults()));

    // Initialize command service
    let mut commands = CommandService::new(&config.bot.prefix).with_owner(config.owner.user_id);
    commands.register_defaults();

    register_fun_commands(&mut commands);
    register_economy_commands(&mut commands, economy);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return;
        }
    };

    // Run console bot (dev mode)
    rt.block_on(async {
        let bot = ConsoleAdapter::new();
        run_console_bot(bot, commands, &config).await;
    });
}

fn init_config() {
    let config = Config::default();
    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            if let Err(e) = std::fs::write("config.yaml", yaml) {
                tracing::error!("Failed to write config.yaml: {}", e);
            } else {
                println!("Wrote default config to config.yaml");
            }
        }
        Err(e) => tracing::error!("Failed to serialize config: {}", e),
    }
}

async fn run_console_bot(bot: ConsoleAdapter, commands: CommandService, config: &Config) {
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start console bot: {}", e);
        return;
    }

    let parser = MessageParser::new(commands.prefix());
    // The console session acts as a single user; the owner id makes
    // privileged commands reachable in dev mode.
    let console_user = User::new(config.owner.user_id.unwrap_or(1)).with_username("console");

    loop {
        let Some(line) = bot.read_line("> ").await else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        let message = parser
            .parse("console", line, Some(console_user.clone()))
            .with_platform("console");

        if !message.content.is_command() {
            continue;
        }

        let response = match commands.handle(&message).await {
            Ok(Some(response)) => response,
            Ok(None) => continue,
            Err(CommandError::PermissionDenied) => {
                format!(
                    "I'm sorry {}, I'm afraid I can't do that.",
                    console_user.display_name()
                )
            }
            Err(CommandError::InvalidArgs(msg)) => msg,
            Err(e) => format!("Error: {}", e),
        };

        if let Err(e) = bot.send_message("console", &response).await {
            tracing::error!("Failed to send message: {}", e);
        }
    }

    tracing::info!("Console session ended");
}

fn command_args(msg: &Message) -> &[String] {
    match &msg.content {
        Content::Command { args, .. } => args,
        _ => &[],
    }
}

fn sender_id(msg: &Message) -> Result<i64, CommandError> {
    msg.sender
        .as_ref()
        .map(|u| u.id)
        .ok_or_else(|| CommandError::ExecutionFailed("No sender on message".to_string()))
}

/// Map a storage fault to a generic user-facing failure, logging the cause.
fn storage_failure(e: StorageError) -> CommandError {
    tracing::error!("Ledger operation failed: {}", e);
    CommandError::ExecutionFailed("Something went wrong. Please try again later.".to_string())
}

fn register_fun_commands(commands: &mut CommandService) {
    commands.register(
        Command::new("ping")
            .with_description("Check the bot is alive")
            .with_handler(|_msg| async { Ok("pong".to_string()) }),
    );

    commands.register(
        Command::new("coinflip")
            .with_description("Flip a coin")
            .with_aliases(vec!["cf".to_string()])
            .with_handler(|_msg| async {
                let side = if rand::thread_rng().gen_bool(0.5) {
                    "heads"
                } else {
                    "tails"
                };
                Ok(format!("Flipping a coin... {}!", side))
            }),
    );

    commands.register(
        Command::new("random")
            .with_description("Generate a random number")
            .with_aliases(vec!["rand".to_string()])
            .with_usage("random <num1> [num2]")
            .with_handler(|msg| async move {
                let args = command_args(&msg);
                if args.is_empty() {
                    return Err(CommandError::InvalidArgs(
                        "Please specify at least one number.".to_string(),
                    ));
                }
                let parse = |s: &String| {
                    s.parse::<i64>().map_err(|_| {
                        CommandError::InvalidArgs("Please specify one or two numbers.".to_string())
                    })
                };
                let (low, high) = match args {
                    [a] => (1, parse(a)?),
                    [a, b, ..] => (parse(a)?, parse(b)?),
                    [] => unreachable!(),
                };
                if low > high {
                    return Err(CommandError::InvalidArgs(
                        "Please specify one or two numbers.".to_string(),
                    ));
                }
                let number = rand::thread_rng().gen_range(low..=high);
                Ok(format!("Generating random number... {}!", number))
            }),
    );
}

fn register_economy_commands(commands: &mut CommandService, economy: Arc<EconomyService>) {
    // balance [user_id]
    let svc = economy.clone();
    commands.register(
        Command::new("balance")
            .with_description("Show wallet, vault, and net worth")
            .with_aliases(vec!["bal".to_string()])
            .with_usage("balance [user_id]")
            .with_handler(move |msg| {
                let svc = svc.clone();
                async move {
                    let user_id = match command_args(&msg).first() {
                        Some(arg) => arg.parse::<i64>().map_err(|_| {
                            CommandError::InvalidArgs(
                                "Please specify a numeric user id.".to_string(),
                            )
                        })?,
                        None => sender_id(&msg)?,
                    };
                    let balance = svc.get_balance(user_id).await.map_err(storage_failure)?;
                    Ok(format!(
                        "Wallet: {}\nVault: {}\nNet Worth: {}",
                        balance.wallet, balance.vault, balance.net_worth
                    ))
                }
            }),
    );

    // deposit <amount>
    let svc = economy.clone();
    commands.register(
        Command::new("deposit")
            .with_description("Move funds from your wallet into your vault")
            .with_aliases(vec!["dep".to_string()])
            .with_usage("deposit <amount>")
            .with_handler(move |msg| {
                let svc = svc.clone();
                async move {
                    let amount = parse_amount(command_args(&msg).first(), "deposit")?;
                    let user_id = sender_id(&msg)?;
                    match svc.move_to_vault(user_id, amount).await.map_err(storage_failure)? {
                        TransferOutcome::Completed => {
                            Ok(format!("Successfully deposited {} into your vault.", amount))
                        }
                        TransferOutcome::Insufficient(balance) => Ok(format!(
                            "You can't deposit {} into your vault, because you only have {} in your wallet.",
                            amount, balance.wallet
                        )),
                    }
                }
            }),
    );

    // withdraw <amount>
    let svc = economy.clone();
    commands.register(
        Command::new("withdraw")
            .with_description("Move funds from your vault back into your wallet")
            .with_aliases(vec!["with".to_string()])
            .with_usage("withdraw <amount>")
            .with_handler(move |msg| {
                let svc = svc.clone();
                async move {
                    let amount = parse_amount(command_args(&msg).first(), "withdraw")?;
                    let user_id = sender_id(&msg)?;
                    match svc.move_to_wallet(user_id, amount).await.map_err(storage_failure)? {
                        TransferOutcome::Completed => {
                            Ok(format!("Successfully withdrew {} from your vault.", amount))
                        }
                        TransferOutcome::Insufficient(balance) => Ok(format!(
                            "You can't withdraw {} into your wallet, because you only have {} in your vault.",
                            amount, balance.vault
                        )),
                    }
                }
            }),
    );

    // setmoney <user_id> <wallet> <vault> (owner only)
    let svc = economy;
    commands.register(
        Command::new("setmoney")
            .with_description("Set a user's wallet and vault (owner only)")
            .with_usage("setmoney <user_id> <wallet> <vault>")
            .with_permission("owner")
            .with_handler(move |msg| {
                let svc = svc.clone();
                async move {
                    let args = command_args(&msg);
                    let [user_id, wallet, vault] = args else {
                        return Err(CommandError::InvalidArgs(
                            "Please specify a user id, wallet amount, and vault amount."
                                .to_string(),
                        ));
                    };
                    let parse = |s: &String| {
                        s.parse::<i64>().map_err(|_| {
                            CommandError::InvalidArgs(
                                "Please specify numbers numerically.".to_string(),
                            )
                        })
                    };
                    let (user_id, wallet, vault) = (parse(user_id)?, parse(wallet)?, parse(vault)?);
                    if wallet < 0 || vault < 0 {
                        return Err(CommandError::InvalidArgs(
                            "Please specify positive numbers.".to_string(),
                        ));
                    }
                    svc.set_balance(user_id, wallet, vault)
                        .await
                        .map_err(storage_failure)?;
                    Ok(format!(
                        "Successfully set user {}'s wallet and vault to {} and {}.",
                        user_id, wallet, vault
                    ))
                }
            }),
    );
}

/// Amount validation lives here, at the command layer; the economy service
/// assumes a valid positive integer.
fn parse_amount(arg: Option<&String>, verb: &str) -> Result<i64, CommandError> {
    let Some(arg) = arg else {
        return Err(CommandError::InvalidArgs(format!("Please {} an amount.", verb)));
    };
    let amount: i64 = arg.parse().map_err(|_| {
        CommandError::InvalidArgs(format!("Please {} a numeric amount.", verb))
    })?;
    if amount < 1 {
        return Err(CommandError::InvalidArgs(format!(
            "Please {} an amount larger than zero.",
            verb
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_validates() {
        assert!(parse_amount(None, "deposit").is_err());
        assert!(parse_amount(Some(&"abc".to_string()), "deposit").is_err());
        assert!(parse_amount(Some(&"0".to_string()), "deposit").is_err());
        assert!(parse_amount(Some(&"-5".to_string()), "deposit").is_err());
        assert_eq!(parse_amount(Some(&"30".to_string()), "deposit").unwrap(), 30);
    }
}
