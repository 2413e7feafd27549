//! Contentos chain client CLI.

use anyhow::{bail, Context};
use clap::Parser;
use cos_rpc::PageError;
use cos_types::{AccountName, ChainId};
use cos_utils::LogFormat;
use cos_wallet_core::{KeyStoreWallet, MemWallet, WalletConfig};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cos-cli", about = "Contentos chain client")]
struct Cli {
    /// Node JSON-RPC endpoint, e.g. "http://127.0.0.1:8888".
    #[arg(long, env = "COS_NODE_URL")]
    node_url: Option<String>,

    /// Chain the signatures are bound to: "main", "test", or "dev".
    #[arg(long, env = "COS_CHAIN_ID")]
    chain_id: Option<ChainId>,

    /// Encrypted key store file.
    #[arg(long, env = "COS_KEYSTORE")]
    keystore: Option<PathBuf>,

    /// Password of the key store.
    #[arg(long, env = "COS_KEYSTORE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Entries per page for list commands.
    #[arg(long, env = "COS_PAGE_SIZE")]
    page_size: Option<u32>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "COS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, env = "COS_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the node's head state.
    State,

    /// Print an account.
    Account { name: String },

    /// Transfer coins between accounts. The sender must be in the key store.
    Transfer {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "")]
        memo: String,
    },

    /// List an account's followers.
    Followers {
        name: String,
        /// Pages to fetch.
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Generate a mnemonic and print it with its key pair.
    Mnemonic,

    /// Manage the key store.
    Keystore {
        #[command(subcommand)]
        action: KeystoreAction,
    },
}

#[derive(clap::Subcommand)]
enum KeystoreAction {
    /// Import an account by private key or mnemonic.
    Add {
        name: String,
        #[arg(long, conflicts_with = "mnemonic", required_unless_present = "mnemonic")]
        key: Option<String>,
        #[arg(long)]
        mnemonic: Option<String>,
    },
    /// List account names in the key store.
    List,
}

/// File config as the base, CLI flags and env vars on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<WalletConfig> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WalletConfig::default(),
    };
    if let Some(url) = &cli.node_url {
        config.node_url = url.clone();
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = chain_id;
    }
    if let Some(path) = &cli.keystore {
        config.keystore_path = path.clone();
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_keystore(cli: &Cli, config: &WalletConfig) -> anyhow::Result<KeyStoreWallet> {
    let Some(password) = cli.password.as_deref() else {
        bail!("a key store password is required (--password or COS_KEYSTORE_PASSWORD)");
    };
    let inner = MemWallet::from_config(config)?;
    let wallet = KeyStoreWallet::open_with_params(
        &config.keystore_path,
        password,
        inner,
        Default::default(),
    )
    .with_context(|| format!("opening key store {}", config.keystore_path.display()))?;
    Ok(wallet)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    cos_utils::init_tracing_with(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match &cli.command {
        Command::State => {
            let wallet = MemWallet::from_config(&config)?;
            print_json(&wallet.queries().chain_state()?)?;
        }
        Command::Account { name } => {
            let wallet = MemWallet::from_config(&config)?;
            print_json(&wallet.queries().account(&AccountName::new(name.as_str()))?)?;
        }
        Command::Transfer {
            from,
            to,
            amount,
            memo,
        } => {
            let wallet = open_keystore(&cli, &config)?;
            let response = wallet.account(from)?.transfer(to, *amount, memo)?;
            if !response.is_success() {
                tracing::warn!(status = response.status, msg = %response.msg, "transfer rejected");
            }
            print_json(&response)?;
        }
        Command::Followers { name, pages } => {
            let wallet = MemWallet::from_config(&config)?;
            let mut followers = wallet.queries().followers(&AccountName::new(name.as_str()));
            for _ in 0..*pages {
                match followers.next() {
                    Ok(entries) => {
                        for entry in entries {
                            println!("{}", entry.create_order.follower);
                        }
                    }
                    Err(PageError::RangeExhausted) | Err(PageError::OutOfRange) => break,
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Command::Mnemonic => {
            let phrase = cos_wallet_core::keys::new_mnemonic()?;
            let keys = cos_wallet_core::keys::keys_from_mnemonic(&phrase)?;
            println!("mnemonic:    {phrase}");
            println!("public key:  {}", keys.public_key);
            println!("private key: {}", keys.private_key);
        }
        Command::Keystore { action } => {
            let mut wallet = open_keystore(&cli, &config)?;
            match action {
                KeystoreAction::Add {
                    name,
                    key,
                    mnemonic,
                } => {
                    match (key, mnemonic) {
                        (Some(key), _) => wallet.add(name, key)?,
                        (None, Some(phrase)) => wallet.add_by_mnemonic(name, phrase)?,
                        (None, None) => bail!("either --key or --mnemonic is required"),
                    }
                    tracing::info!(account = %name, "account stored");
                }
                KeystoreAction::List => {
                    for name in wallet.accounts() {
                        println!("{name}");
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let cli = Cli::parse_from(["cos-cli", "state"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config, WalletConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cos.toml");
        std::fs::write(
            &path,
            "node_url = \"http://file:1\"\nchain_id = \"dev\"\npage_size = 7\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "cos-cli",
            "--config",
            path.to_str().unwrap(),
            "--node-url",
            "http://flag:2",
            "followers",
            "alice1",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.node_url, "http://flag:2");
        assert_eq!(config.chain_id, ChainId::Dev);
        assert_eq!(config.page_size, 7);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["cos-cli", "--config", "/nonexistent/cos.toml", "state"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn keystore_add_needs_a_secret() {
        assert!(Cli::try_parse_from(["cos-cli", "keystore", "add", "alice1"]).is_err());
        assert!(
            Cli::try_parse_from(["cos-cli", "keystore", "add", "alice1", "--key", "ab"]).is_ok()
        );
    }
}
