use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::net::Ipv4Addr;
use std::time::Duration;
use synject_core::{defaults, Builder};
use tracing_subscriber::EnvFilter;

/// A raw-socket TCP `SYN` probe injector.
///
/// Sends a sequence of hand-built `SYN` packets towards the target, one per
/// increasing time-to-live, so a cooperating listener elsewhere can observe
/// the expired-ttl responses. Requires the privileges to open a raw socket.
#[derive(Parser, Debug)]
#[command(name = "synject", version, about, long_about = None)]
struct Args {
    /// The target IPv4 address in dotted-decimal notation, prompted for if
    /// not given
    target: Option<String>,

    /// The number of probes to send
    #[arg(short = 'c', long, default_value_t = defaults::DEFAULT_PROBE_COUNT)]
    probes: u8,

    /// The time-to-live of the first probe
    #[arg(short = 'f', long, default_value_t = defaults::DEFAULT_FIRST_TTL)]
    first_ttl: u8,

    /// The source address carried in each probe, which need not be an
    /// address of this host
    #[arg(short = 'A', long, default_value_t = defaults::DEFAULT_SOURCE_ADDR)]
    source_addr: Ipv4Addr,

    /// The TCP source port
    #[arg(short = 's', long, default_value_t = defaults::DEFAULT_SOURCE_PORT)]
    source_port: u16,

    /// The TCP destination port
    #[arg(short = 'p', long, default_value_t = defaults::DEFAULT_PROBE_PORT)]
    probe_port: u16,

    /// The base unit of the inter-probe pacing delay, in milliseconds
    #[arg(long, default_value_t = defaults::DEFAULT_DELAY_UNIT.as_millis() as u64)]
    delay_ms: u64,

    /// Enable verbose tracing output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let target = match args.target {
        Some(target) => target,
        None => prompt_target()?,
    };
    Builder::new(target)
        .probe_count(args.probes)
        .first_ttl(args.first_ttl)
        .source_addr(args.source_addr)
        .source_port(args.source_port)
        .probe_port(args.probe_port)
        .delay_unit(Duration::from_millis(args.delay_ms))
        .build()?
        .run()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "synject=debug,synject_core=trace"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt_target() -> anyhow::Result<String> {
    print!("Enter the target IPv4 address: ");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read the target address")?;
    Ok(String::from(line.trim()))
}
