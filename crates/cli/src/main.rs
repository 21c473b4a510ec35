//! Cache simulator CLI.
//!
//! This binary drives the cache engine from the command line. It performs:
//! 1. **Setup:** Build a cache and backing memory from flags or a JSON config file.
//! 2. **Run:** Apply a list of reads (`rADDR`) and writes (`wADDR=VALUE`) in order.
//! 3. **Report:** Print each access outcome, the line table, optionally memory, and statistics.

use std::str::FromStr;
use std::{fs, process};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{SimError, Word};
use cachesim_core::config::{Config, Organization, ReplacementPolicy, WritePolicy};
use cachesim_core::{BackingMemory, CacheModel, CacheSim};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Functional cache simulator",
    long_about = "Simulate direct-mapped, set-associative and fully-associative caches over a random backing memory.\n\nExamples:\n  cachesim run --organization direct-mapped --lines 4 --block-size 1 r0 r4 r8\n  cachesim run --ways 2 --policy fifo --write-policy write-back w5=X r9 r13\n  cachesim run --config cache.json --show-memory r0 w1=42"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Overridden by RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a sequence of reads and writes and report the outcome.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<String>,

    /// Cache organization.
    #[arg(long, value_enum)]
    organization: Option<OrganizationArg>,

    /// Total number of cache lines.
    #[arg(long)]
    lines: Option<usize>,

    /// Words per block.
    #[arg(long)]
    block_size: Option<usize>,

    /// Lines per set (set-associative only).
    #[arg(long)]
    ways: Option<usize>,

    /// Replacement policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Write policy.
    #[arg(long, value_enum)]
    write_policy: Option<WritePolicyArg>,

    /// Backing memory size in words.
    #[arg(long)]
    memory_size: Option<usize>,

    /// Seed for memory contents and random replacement.
    #[arg(long)]
    seed: Option<u64>,

    /// Print backing memory contents after the run.
    #[arg(long)]
    show_memory: bool,

    /// Operations: `rADDR` reads, `wADDR=VALUE` writes.
    #[arg(required = true)]
    ops: Vec<Op>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrganizationArg {
    DirectMapped,
    SetAssociative,
    FullyAssociative,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Lru,
    Fifo,
    Random,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WritePolicyArg {
    WriteThrough,
    WriteBack,
}

impl From<OrganizationArg> for Organization {
    fn from(arg: OrganizationArg) -> Self {
        match arg {
            OrganizationArg::DirectMapped => Self::DirectMapped,
            OrganizationArg::SetAssociative => Self::SetAssociative,
            OrganizationArg::FullyAssociative => Self::FullyAssociative,
        }
    }
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Fifo => Self::Fifo,
            PolicyArg::Random => Self::Random,
        }
    }
}

impl From<WritePolicyArg> for WritePolicy {
    fn from(arg: WritePolicyArg) -> Self {
        match arg {
            WritePolicyArg::WriteThrough => Self::WriteThrough,
            WritePolicyArg::WriteBack => Self::WriteBack,
        }
    }
}

/// A single cache operation parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Op {
    Read(usize),
    Write(usize, Word),
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_addr = |a: &str| {
            a.parse::<usize>()
                .map_err(|e| format!("invalid address {a:?} in {s:?}: {e}"))
        };
        if let Some(addr) = s.strip_prefix('r') {
            return Ok(Self::Read(parse_addr(addr)?));
        }
        if let Some(rest) = s.strip_prefix('w') {
            let (addr, value) = rest
                .split_once('=')
                .ok_or_else(|| format!("write {s:?} must look like wADDR=VALUE"))?;
            return Ok(Self::Write(parse_addr(addr)?, Word::new(value)));
        }
        Err(format!("operation {s:?} must start with 'r' or 'w'"))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => cmd_run(args),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Installs the `tracing` subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the configuration: file (if any) first, then flag overrides.
fn load_config(args: &RunArgs) -> Result<Config, SimError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {path}: {e}");
                process::exit(1);
            });
            Config::from_json(&text)?
        }
        None => Config::default(),
    };

    if let Some(org) = args.organization {
        config.cache.organization = org.into();
    }
    if let Some(lines) = args.lines {
        config.cache.lines = lines;
    }
    if let Some(block_size) = args.block_size {
        config.cache.block_size = block_size;
    }
    if let Some(ways) = args.ways {
        config.cache.ways = ways;
    }
    if let Some(policy) = args.policy {
        config.cache.policy = policy.into();
    }
    if let Some(write_policy) = args.write_policy {
        config.cache.write_policy = write_policy.into();
    }
    if let Some(size) = args.memory_size {
        config.memory.size = size;
    }
    if let Some(seed) = args.seed {
        config.memory.seed = Some(seed);
        config.cache.seed = Some(seed);
    }
    Ok(config)
}

/// Runs every operation against a freshly built cache and prints the report.
fn cmd_run(args: RunArgs) -> Result<(), SimError> {
    let config = load_config(&args)?;

    let memory = config.memory.seed.map_or_else(
        || BackingMemory::new(config.memory.size),
        |seed| BackingMemory::with_seed(config.memory.size, seed),
    );
    let mut cache = CacheSim::from_config(&config.cache, memory)?;

    println!(
        "Configuration: {:?} lines={} block={} ways={} sets={} policy={:?} write={:?} memory={}",
        config.cache.organization,
        config.cache.lines,
        cache.block_size(),
        cache.associativity(),
        cache.num_sets(),
        cache.replacement_policy(),
        cache.write_policy(),
        cache.memory().size()
    );
    println!();

    run_ops(&mut cache, &args.ops)?;

    print_lines(&cache);
    if args.show_memory {
        print_memory(cache.memory());
    }
    cache.stats().print();
    Ok(())
}

fn run_ops(cache: &mut dyn CacheModel, ops: &[Op]) -> Result<(), SimError> {
    for op in ops {
        let outcome = match op {
            Op::Read(addr) => cache.read(*addr)?,
            Op::Write(addr, value) => cache.write(*addr, value.clone())?,
        };
        println!("{outcome}");
    }
    Ok(())
}

fn print_lines(cache: &dyn CacheModel) {
    println!("\n{:<6} {:<6} {:<6} {:<6} DATA", "LINE", "VALID", "DIRTY", "TAG");
    for line in cache.lines() {
        let tag = line
            .tag()
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let data: Vec<&str> = line.data().iter().map(Word::as_str).collect();
        println!(
            "{:<6} {:<6} {:<6} {:<6} [{}]",
            line.index(),
            line.is_valid(),
            line.is_dirty(),
            tag,
            data.join(", ")
        );
    }
}

fn print_memory(memory: &BackingMemory) {
    println!("\n{:<8} VALUE", "ADDRESS");
    for (addr, word) in memory.cells() {
        println!("{addr:<8} {word}");
    }
}
