//! samwire CLI
//!
//! Opens a SAM bridge connection and exchanges raw commands.

use clap::{Parser, Subcommand};
use samwire::{Client, ClientConfig, DEFAULT_ADDRESS};
use tracing_subscriber::{fmt, EnvFilter};

/// samwire CLI
#[derive(Parser, Debug)]
#[command(name = "samwire-cli")]
#[command(about = "Talk to a SAM v3 bridge")]
#[command(version)]
struct Args {
    /// Bridge address (host:port)
    #[arg(short, long, default_value = DEFAULT_ADDRESS)]
    address: String,

    /// Echo every sent and received line
    #[arg(short, long)]
    verbose: bool,

    /// Dial timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    connect_timeout_ms: u64,

    /// Read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Perform the handshake and print the negotiated version
    Hello,

    /// Send one raw command line after the handshake
    Send {
        /// Words of the command, joined with single spaces
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,samwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder()
        .address(&args.address)
        .verbose(args.verbose)
        .connect_timeout_ms(args.connect_timeout_ms)
        .read_timeout_ms(args.read_timeout_ms)
        .build();

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: ClientConfig, command: Commands) -> samwire::Result<()> {
    let mut client = Client::with_config(config)?;

    match command {
        Commands::Hello => {
            println!("{} VERSION={}", client.peer_addr(), client.version());
        }
        Commands::Send { words } => {
            let reply = client.send_command(&words.join(" "))?;
            println!("{}", reply);
        }
    }

    client.close()
}
