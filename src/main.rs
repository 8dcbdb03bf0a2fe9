//! throttr - wire inspector for the throttr protocol
//!
//! Builds any request from flags and prints its bytes as hex, or decodes
//! hex back into a request view.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use throttr_protocol::{AttributeType, ChangeType, TtlType, ValueType};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "throttr")]
#[command(about = "Encode and decode throttr protocol requests")]
#[command(version)]
struct Cli {
    /// Log encode/decode steps
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text", env = "THROTTR_FORMAT")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a request and print its wire bytes
    Encode {
        #[command(subcommand)]
        request: EncodeCommand,
    },

    /// Decode wire bytes given as hex
    Decode {
        /// Hex-encoded message (whitespace is ignored)
        hex: String,
    },
}

#[derive(Subcommand)]
pub enum EncodeCommand {
    /// Create a counter
    Insert {
        #[arg(short, long)]
        quota: ValueType,

        #[arg(long, default_value = "seconds")]
        ttl_type: TtlType,

        #[arg(long)]
        ttl: ValueType,

        key: String,
    },

    /// Mutate the quota or TTL of an entry
    Update {
        #[arg(short, long)]
        attribute: AttributeType,

        #[arg(short, long)]
        change: ChangeType,

        #[arg(long)]
        value: ValueType,

        key: String,
    },

    /// Store a raw value
    Set {
        #[arg(long, default_value = "seconds")]
        ttl_type: TtlType,

        #[arg(long)]
        ttl: ValueType,

        /// Treat VALUE as hex
        #[arg(long)]
        hex_value: bool,

        key: String,

        value: String,
    },

    /// Read the quota and TTL of a counter
    Query { key: String },

    /// Remove an entry
    Purge { key: String },

    /// Read a raw value
    Get { key: String },

    /// Read the counters of an entry
    Stat { key: String },

    /// Subscribe to a channel
    Subscribe { channel: String },

    /// Unsubscribe from a channel
    Unsubscribe { channel: String },

    /// Publish a message to a channel
    Publish {
        /// Treat VALUE as hex
        #[arg(long)]
        hex_value: bool,

        channel: String,

        value: String,
    },

    /// Server push of a published message
    Event {
        /// Treat PAYLOAD as hex
        #[arg(long)]
        hex_value: bool,

        channel: String,

        payload: String,
    },

    /// Details of one channel
    Channel { channel: String },

    /// Details of one connection
    Connection {
        /// Connection ID (random if omitted)
        id: Option<Uuid>,
    },

    /// List entries
    List,

    /// Server information
    Info,

    /// Counters of every entry
    Stats,

    /// List connections
    Connections,

    /// List channels
    Channels,

    /// Identifier of this connection
    #[command(name = "whoami")]
    WhoAmI,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let output = commands::execute(cli.command, cli.format)?;
    println!("{}", output);
    Ok(())
}
