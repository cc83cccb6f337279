//! Command-line F Point tracker
//!
//! `fpoint show` prints a one-off report per wallet, `fpoint watch` keeps a
//! single wallet's balance ticking, and `project`/`daily-rate` run the
//! estimator offline on values copied from the API. `pool-tokens` looks up a
//! pool's wrapped token amount and `holders` counts owners in a saved mintlist.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use fpoint_tracker::{
    accrual::{
        format_amount, projected_daily_rate, AccrualEstimator, DAILY_PRECISION,
        DEFAULT_PRECISION, RATE_PRECISION,
    },
    activity::{
        contribution_calendar, daily_series, ActivityHistory, Intensity, ACTIVITY_WINDOW_DAYS,
        MAX_SERIES_DAYS,
    },
    api::{FragmetricClient, PointsSource},
    display::{format_number, short_address},
    holders::{aggregate, load_assets},
    LiveTracker, PointsReport, SystemClock, TrackerConfig,
};
use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fpoint", version, about = "Track real-time F Point accrual")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Points API base URL (overrides config and FPOINT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print current balances for one or more wallets
    Show {
        #[arg(required = true)]
        wallets: Vec<String>,
        /// DeFi pool to include in the breakdown (repeatable)
        #[arg(long = "pool")]
        pools: Vec<String>,
        /// Emit the reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep one wallet's balance updating
    Watch {
        wallet: String,
        #[arg(long = "pool")]
        pools: Vec<String>,
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Project a snapshot to now
    Project {
        amount: String,
        rate: String,
        estimated_at: String,
        /// Keep the fixed-point scale instead of dividing by 10,000
        #[arg(long)]
        raw: bool,
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,
    },
    /// Daily accrual for a per-second rate
    DailyRate {
        rate: String,
        #[arg(long)]
        raw: bool,
        #[arg(long, default_value_t = DAILY_PRECISION)]
        precision: usize,
    },
    /// Summarise a saved activity history (JSON with `dailyPoints`)
    Activity {
        history: PathBuf,
        #[arg(
            long,
            default_value_t = ACTIVITY_WINDOW_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SERIES_DAYS)),
        )]
        days: u32,
        /// Print the yearly contribution calendar instead
        #[arg(long)]
        calendar: bool,
    },
    /// Wrapped token amount held by a DeFi pool
    PoolTokens {
        pool: String,
    },
    /// Count holders in a saved mintlist (JSON array of assets)
    Holders {
        mintlist: PathBuf,
        /// Emit the holders as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Show { ref wallets, ref pools, json } => {
            let config = load_config(&cli)?;
            show(&config, wallets, pools, json)
        }
        Command::Watch { ref wallet, ref pools, ticks } => {
            let config = load_config(&cli)?;
            watch(&config, wallet, pools, ticks)
        }
        Command::Project { ref amount, ref rate, ref estimated_at, raw, precision } => {
            let value = AccrualEstimator::system()
                .project_current_amount(amount, rate, estimated_at, !raw);
            println!("{}", format_amount(value, precision));
            Ok(())
        }
        Command::DailyRate { ref rate, raw, precision } => {
            println!("{}", format_amount(projected_daily_rate(rate, !raw), precision));
            Ok(())
        }
        Command::Activity { ref history, days, calendar } => activity(history, days, calendar),
        Command::PoolTokens { ref pool } => {
            let config = load_config(&cli)?;
            pool_tokens(&config, pool)
        }
        Command::Holders { ref mintlist, json } => holders(mintlist, json),
    }
}

fn load_config(cli: &Cli) -> Result<TrackerConfig> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TrackerConfig::default(),
    };
    config.apply_env();
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn pool_list(config: &TrackerConfig, extra: &[String]) -> Vec<String> {
    let mut pools = config.pool_addresses.clone();
    for pool in extra {
        if !pools.contains(pool) {
            pools.push(pool.clone());
        }
    }
    pools
}

fn fetch_report(
    client: &FragmetricClient,
    wallet: &str,
    pools: &[String],
) -> Result<Option<PointsReport>> {
    let Some(user) = client
        .user_estimation(wallet)
        .with_context(|| format!("Failed to fetch estimation for {wallet}"))?
    else {
        return Ok(None);
    };
    let pool_estimations = client
        .pool_estimations(wallet, pools)
        .with_context(|| format!("Failed to fetch pool estimations for {wallet}"))?;
    Ok(Some(PointsReport::build(&user, pool_estimations.as_ref(), Utc::now())))
}

fn show(config: &TrackerConfig, wallets: &[String], extra_pools: &[String], json: bool) -> Result<()> {
    let start = Instant::now();
    let client = FragmetricClient::from_config(config)?;
    let pools = pool_list(config, extra_pools);

    // Fetch all wallets in parallel
    let results: Vec<(&String, Result<Option<PointsReport>>)> = wallets
        .par_iter()
        .map(|wallet| (wallet, fetch_report(&client, wallet, &pools)))
        .collect();
    info!("fetched {} wallets in {:?}", wallets.len(), start.elapsed());

    let mut failures = 0;
    let mut reports = Vec::new();
    for (wallet, result) in results {
        match result {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => eprintln!("{}: no F Point data", short_address(wallet)),
            Err(e) => {
                eprintln!("{}: {e:#}", short_address(wallet));
                failures += 1;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    if failures > 0 {
        bail!("{failures} of {} wallets failed", wallets.len());
    }
    Ok(())
}

fn print_report(report: &PointsReport) {
    println!("\nWallet {}", short_address(&report.wallet));
    let age = report
        .seconds_since_estimate
        .map(|s| format!("{s}s ago"))
        .unwrap_or_else(|| "at an unknown time".to_string());
    println!(
        "  Estimated {age}. Accruing at {} F Points/second ({}/day)",
        format_amount(report.total_per_second, RATE_PRECISION),
        format_amount(report.total_daily, DAILY_PRECISION),
    );
    println!(
        "  Total F Points: {}  (settled {})",
        format_amount(report.total, DEFAULT_PRECISION),
        format_amount(report.settled, DEFAULT_PRECISION),
    );
    println!(
        "  Base:     {}  rate {}/sec",
        format_amount(report.base, DEFAULT_PRECISION),
        format_amount(report.base_per_second, RATE_PRECISION),
    );
    println!(
        "  Referral: {}  rate {}/sec",
        format_amount(report.referral, DEFAULT_PRECISION),
        format_amount(report.referral_per_second, RATE_PRECISION),
    );

    if let Some(rank) = &report.rank {
        let mut line = format!("  Rank #{}", format_number(rank.rank as f64));
        if let Some(change) = &rank.change {
            line.push_str(&format!("  change {}", change.text));
        }
        if let Some(percentile) = rank.percentile {
            line.push_str(&format!("  top {percentile}%"));
        }
        println!("{line}");
    }

    for pool in &report.pools {
        println!(
            "  Pool {}: {} F Points  +{}/sec  daily +{}  token {}",
            short_address(&pool.label),
            format_amount(pool.current, DEFAULT_PRECISION),
            format_amount(pool.per_second, RATE_PRECISION),
            format_amount(pool.daily, DAILY_PRECISION),
            short_address(&pool.receipt_token_mint),
        );
    }
}

fn watch(config: &TrackerConfig, wallet: &str, extra_pools: &[String], ticks: Option<u64>) -> Result<()> {
    let client = FragmetricClient::from_config(config)?;
    let mut tracker = LiveTracker::new(client, SystemClock, wallet, config.refetch_interval())
        .with_pools(pool_list(config, extra_pools));

    let mut count = 0u64;
    loop {
        match tracker.tick() {
            Some(report) => println!(
                "{}  total {}  base {}  referral {}",
                report.as_of.format("%H:%M:%S"),
                format_amount(report.total, DEFAULT_PRECISION),
                format_amount(report.base, DEFAULT_PRECISION),
                format_amount(report.referral, DEFAULT_PRECISION),
            ),
            None => println!("waiting for data for {}", short_address(wallet)),
        }

        count += 1;
        if ticks.is_some_and(|limit| count >= limit) {
            return Ok(());
        }
        std::thread::sleep(config.display_refresh());
    }
}

fn activity(path: &Path, days: u32, calendar: bool) -> Result<()> {
    let history = ActivityHistory::load(path)
        .with_context(|| format!("Failed to load activity history {}", path.display()))?;
    let today = Utc::now().date_naive();

    if calendar {
        for week in contribution_calendar(&history, today) {
            let row: String = week
                .iter()
                .map(|day| char::from(b'0' + Intensity::classify(day.points).level()))
                .collect();
            println!("{} {row}", week[0].date);
        }
        return Ok(());
    }

    let series = daily_series(&history, today, days);
    let total: f64 = series.iter().map(|d| d.points).sum();
    for day in &series {
        println!("{}  {:>12}", day.date.format("%b %e"), format_number(day.points));
    }
    println!("Total over {days} days: {}", format_number(total));
    Ok(())
}

fn pool_tokens(config: &TrackerConfig, pool: &str) -> Result<()> {
    let client = FragmetricClient::from_config(config)?;
    match client
        .wrapped_token_amount(pool)
        .with_context(|| format!("Failed to fetch wrapped token amount for {pool}"))?
    {
        Some(amount) => println!("{}: {}", short_address(pool), format_number(amount)),
        None => println!("{}: no wrapped token data", short_address(pool)),
    }
    Ok(())
}

fn holders(path: &Path, json: bool) -> Result<()> {
    let assets = load_assets(path)
        .with_context(|| format!("Failed to load mintlist {}", path.display()))?;
    let holders = aggregate(&assets);
    info!("{} assets across {} holders", assets.len(), holders.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&holders)?);
        return Ok(());
    }
    for holder in &holders {
        println!("{}  {:>8}", holder.address, format_number(holder.amount as f64));
    }
    Ok(())
}
