//! dnsdot - encode payloads into DNS query names and back
//!
//! ```bash
//! dnsdot encode --domain tunnel.example.com --text hello
//! dnsdot decode --domain tunnel.example.com NBSWY3DP.tunnel.example.com.
//! dnsdot capacity --domain tunnel.example.com
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::io::{Read, Write};
use std::path::PathBuf;

use dnsdot::{CodecConfig, DnsCodec};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ", ",
    env!("GIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "dnsdot")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Binary-to-DNS-name codec", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "DNSDOT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a payload into a DNS name
    Encode {
        /// Base domain (overrides the config file)
        #[arg(short, long)]
        domain: Option<String>,

        /// Payload as UTF-8 text
        #[arg(short, long, conflicts_with = "hex")]
        text: Option<String>,

        /// Payload as hex
        #[arg(short = 'x', long)]
        hex: Option<String>,
    },

    /// Decode the payload carried by a DNS name
    Decode {
        /// Base domain (overrides the config file)
        #[arg(short, long)]
        domain: Option<String>,

        /// Write raw bytes instead of hex
        #[arg(short, long)]
        raw: bool,

        /// Name to decode
        name: String,
    },

    /// Show how many payload bytes fit in one name
    Capacity {
        /// Base domain (overrides the config file)
        #[arg(short, long)]
        domain: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = if let Some(path) = &cli.config {
        CodecConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?
    } else {
        CodecConfig::default()
    };

    match cli.command {
        Commands::Encode { domain, text, hex } => {
            let codec = build_codec(config, domain)?;
            let payload = read_payload(text, hex)?;
            run_encode(&codec, &payload)?;
        }
        Commands::Decode { domain, raw, name } => {
            let codec = build_codec(config, domain)?;
            run_decode(&codec, &name, raw)?;
        }
        Commands::Capacity { domain } => {
            let codec = build_codec(config, domain)?;
            run_capacity(&codec);
        }
    }

    Ok(())
}

fn build_codec(mut config: CodecConfig, domain: Option<String>) -> Result<DnsCodec> {
    if let Some(domain) = domain {
        config.domain = domain;
    }
    DnsCodec::from_config(&config).context("Invalid codec configuration")
}

fn read_payload(text: Option<String>, hex_text: Option<String>) -> Result<Vec<u8>> {
    if let Some(text) = text {
        return Ok(text.into_bytes());
    }
    if let Some(hex_text) = hex_text {
        return hex::decode(hex_text.trim()).context("Payload is not valid hex");
    }

    debug!("Reading payload from stdin");
    let mut payload = Vec::new();
    std::io::stdin()
        .read_to_end(&mut payload)
        .context("Failed to read payload from stdin")?;
    Ok(payload)
}

fn run_encode(codec: &DnsCodec, payload: &[u8]) -> Result<()> {
    let fqdn = codec
        .encode_query(payload)
        .with_context(|| format!("Cannot encode {} byte payload", payload.len()))?;

    info!(
        "Encoded {} bytes into {} octet name",
        payload.len(),
        dnsdot::labels::wire_len(&fqdn)
    );
    println!("{}", fqdn);
    Ok(())
}

fn run_decode(codec: &DnsCodec, name: &str, raw: bool) -> Result<()> {
    let payload = codec
        .decode_query(name.trim())
        .with_context(|| format!("Cannot decode {:?}", name))?;

    info!("Decoded {} bytes", payload.len());
    if raw {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&payload)?;
        stdout.flush()?;
    } else {
        println!("{}", hex::encode(&payload));
    }
    Ok(())
}

fn run_capacity(codec: &DnsCodec) {
    let limits = codec.limits();
    println!("Domain:          {:?}", codec.domain());
    println!("Max label len:   {}", limits.max_label_len);
    println!("Max name len:    {}", limits.max_name_len);
    println!("Max payload len: {} bytes", codec.max_payload_len());
}
