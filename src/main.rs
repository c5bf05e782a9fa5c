use clap::{Parser, Subcommand};
use lemo_tx::utils::logging;
use lemo_tx::{log_error, log_info, ChainConfig, PrivateKey, Transaction, TxError, TxResult};
use serde_json::{json, Value};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lemo-tx", version, about = "Build, sign and verify LemoChain transactions")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// JSON chain config (chainId, txVersion, ttlSecs)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the chain id from the config
    #[arg(long, global = true)]
    chain_id: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random private key and its address
    Keygen {
        #[arg(long)]
        json: bool,
    },
    /// Sign a transaction read from FILE (or stdin)
    Sign {
        /// Private key as hex
        #[arg(long)]
        key: String,
        input: Option<String>,
    },
    /// Recover the signer of a signed transaction
    Recover { input: Option<String> },
    /// Print the identifier and signing hashes
    Hash { input: Option<String> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        logging::enable_debug();
    }

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error!("cli", "command failed", reason = e.to_string());
            let envelope = json!({ "error": { "code": e.code(), "message": e.to_string() } });
            println!("{}", envelope);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> TxResult<String> {
    let mut chain = match &cli.config {
        Some(path) => ChainConfig::from_file(path)?,
        None => ChainConfig::default(),
    };
    if let Some(chain_id) = cli.chain_id {
        chain.chain_id = chain_id;
    }

    let output = match cli.command {
        Command::Keygen { json } => {
            let key = PrivateKey::random();
            let address = key.address()?;
            if !json {
                return Ok(format!("Private key (hex): {}\nAddress: {}", key.to_hex(), address));
            }
            json!({
                "privateKey": key.to_hex(),
                "address": address.to_string(),
                "addressHex": address.to_hex(),
            })
        }
        Command::Sign { key, input } => {
            let key = PrivateKey::from_hex(&key)?;
            let mut tx = Transaction::from_json_str(&read_input(input.as_deref())?, &chain)?;
            let hash = tx.sign(&key)?;
            log_info!("cli", "transaction signed", hash = hex_hash(&hash));
            json!({ "hash": hex_hash(&hash), "tx": tx.to_json()? })
        }
        Command::Recover { input } => {
            let mut tx = Transaction::from_json_str(&read_input(input.as_deref())?, &chain)?;
            let from = tx.recover()?;
            json!({
                "from": from.to_string(),
                "fromHex": from.to_hex(),
                "hash": hex_hash(&tx.hash()?),
            })
        }
        Command::Hash { input } => {
            let tx = Transaction::from_json_str(&read_input(input.as_deref())?, &chain)?;
            json!({
                "hash": hex_hash(&tx.hash()?),
                "signingHash": hex_hash(&tx.signing_hash()?),
            })
        }
    };

    render(&output)
}

fn read_input(path: Option<&str>) -> TxResult<String> {
    match path {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn hex_hash(hash: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(hash))
}

fn render(value: &Value) -> TxResult<String> {
    serde_json::to_string_pretty(value).map_err(TxError::from)
}
