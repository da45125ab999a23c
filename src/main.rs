//! rho-scan - Max Profit & Cycle Detection
//!
//! Run with: cargo run
//!
//! Subcommands:
//! - demo (default): both exercises on the configured fixtures
//! - profit <PRICES...>
//! - cycle <VALUES...> --pos N
//! - crosscheck: Floyd vs petgraph SCC on random lists

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use console::style;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rho_scan::config::{Config, RunRecord};
use rho_scan::crosscheck::Crosscheck;
use rho_scan::list::{format_path, CycleDetector, ListArena};
use rho_scan::profit::MaxProfitScanner;

#[derive(Parser)]
#[command(name = "rho-scan", version, about = "Max profit scan and Floyd cycle detection")]
struct Cli {
    /// Load settings from a TOML file instead of the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run both exercises on the configured fixtures
    Demo,

    /// Best single buy/sell profit (defaults to configured PRICES)
    Profit {
        prices: Vec<u64>,
    },

    /// Cycle entry of a list (defaults to configured LIST_VALUES / CYCLE_POS)
    Cycle {
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Index the tail links back to; -1 for no cycle
        #[arg(long, allow_negative_numbers = true)]
        pos: Option<i64>,
    },

    /// Compare Floyd against the SCC oracle on random lists
    Crosscheck {
        #[arg(long)]
        trials: Option<usize>,

        #[arg(long)]
        max_len: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn print_banner() {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(" 🔁 RHO-SCAN - Max Profit & Cycle Detection").cyan().bold()
    );
    println!(
        "{}",
        style("    One-pass price scan | Floyd two-pointer cycle search").cyan()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

fn log_run(config: &Config, record: RunRecord) {
    if !config.run_log {
        return;
    }
    if let Err(e) = record.append_to_file(&config.run_log_path) {
        warn!("Failed to write run log {}: {}", config.run_log_path, e);
    }
}

fn run_profit(config: &Config, prices: &[u64]) {
    println!("{}", style("═══ MAX PROFIT ═══").blue().bold());
    println!();

    let start = Instant::now();
    let scanner = MaxProfitScanner::scan(prices);
    let elapsed = start.elapsed();

    println!("   Prices: {:?}", prices);
    println!(
        "{} Max profit: {} ({} days scanned in {:?})",
        style("✓").green(),
        style(scanner.max_profit()).green().bold(),
        scanner.days_observed(),
        elapsed
    );

    match scanner.best_trade() {
        Some(trade) => println!("   Trade: {}", style(trade).cyan()),
        None => println!("   {}", style("No profitable transaction").yellow()),
    }
    info!(days = scanner.days_observed(), profit = scanner.max_profit(), "Profit scan complete");

    log_run(
        config,
        RunRecord::new("profit", format!("{:?}", prices), scanner.max_profit().to_string()),
    );
}

/// Missing VALUES fall back to the configured list; `--pos` always wins over
/// the configured position when given (negative = no cycle).
fn resolve_cycle_args(
    config: &Config,
    values: Vec<i64>,
    pos: Option<i64>,
) -> Result<(Vec<i64>, Option<usize>)> {
    let from_config = values.is_empty();
    let values = if from_config {
        config.list_values.clone()
    } else {
        values
    };

    let pos = match pos {
        Some(p) => usize::try_from(p).ok(),
        None if from_config => config.cycle_pos,
        None => None,
    };

    if let Some(p) = pos {
        if p >= values.len() {
            return Err(eyre!("--pos {} is out of range for a list of {} nodes", p, values.len()));
        }
    }

    Ok((values, pos))
}

fn run_cycle(config: &Config, values: &[i64], pos: Option<usize>) -> Result<()> {
    println!("{}", style("═══ CYCLE DETECTION ═══").magenta().bold());
    println!();

    let (list, head) = ListArena::from_values_with_pos(values, pos)?;
    let path = format_path(&list, head);
    println!("   List: {}", style(&path).cyan());

    let start = Instant::now();
    let detector = CycleDetector::new(&list);
    let info = detector.analyze(head);
    let elapsed = start.elapsed();

    let result = match info {
        Some(info) => {
            let value = list.value(info.entry).unwrap_or_default();
            println!(
                "{} Cycle start {} (node {}) in {:?}",
                style("✓").green(),
                style(value).green().bold(),
                info.entry,
                elapsed
            );
            println!(
                "   Tail: {} nodes | Loop: {} nodes | Pointers met at node {}",
                info.tail_len, info.cycle_len, info.meeting
            );
            info!(entry = %info.entry, value, tail = info.tail_len, cycle = info.cycle_len, "Cycle found");
            value.to_string()
        }
        None => {
            println!("{} No cycle ({:?})", style("○").yellow(), elapsed);
            info!("No cycle");
            "none".to_string()
        }
    };

    log_run(config, RunRecord::new("cycle", path, result));
    Ok(())
}

fn run_crosscheck(config: &Config, trials: usize, max_len: usize, seed: Option<u64>) -> Result<()> {
    println!("{}", style("═══ CROSSCHECK ═══").yellow().bold());
    println!();

    let check = Crosscheck::new(trials, max_len, seed);
    println!("   Seed: {} | Trials: {} | Max length: {}", check.seed(), trials, max_len);

    let start = Instant::now();
    let report = check.run()?;

    println!(
        "{} {} lists agree ({} cyclic, {} acyclic) in {:?}",
        style("✓").green(),
        report.trials,
        report.cyclic,
        report.acyclic,
        start.elapsed()
    );

    log_run(
        config,
        RunRecord::new(
            "crosscheck",
            format!("trials={} max_len={} seed={}", trials, max_len, report.seed),
            "ok",
        ),
    );
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rho_scan=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e);
    }

    print_banner();

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            config.print_summary();
            println!();
            run_profit(&config, &config.prices);
            println!();
            run_cycle(&config, &config.list_values, config.cycle_pos)?;
        }
        Command::Profit { prices } => {
            let prices = if prices.is_empty() { config.prices.clone() } else { prices };
            run_profit(&config, &prices);
        }
        Command::Cycle { values, pos } => {
            let (values, pos) = resolve_cycle_args(&config, values, pos)?;
            run_cycle(&config, &values, pos)?;
        }
        Command::Crosscheck { trials, max_len, seed } => {
            run_crosscheck(
                &config,
                trials.unwrap_or(config.crosscheck_trials),
                max_len.unwrap_or(config.crosscheck_max_len),
                seed.or(config.crosscheck_seed),
            )?;
        }
    }

    println!();
    Ok(())
}
