use clap::Parser;
use ferrous_rdns_domain::CliOverrides;
use ferrous_rdns_infrastructure::pipeline::UnorderedPipeline;
use ferrous_rdns_jobs::{CacheCleanupJob, JobRunner};
use output::{LineSink, OutputFormat, ResolvedRecord};
use std::net::IpAddr;
use tokio::io::{AsyncBufReadExt, BufReader, BufWriter};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-rdns")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous rDNS - Cached, deduplicated reverse DNS lookups")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Seconds a resolved address stays cached (0 disables caching)
    #[arg(long)]
    ttl_secs: Option<u64>,

    /// How long a single lookup waits for its answer, in milliseconds
    #[arg(long)]
    lookup_timeout_ms: Option<u64>,

    /// Concurrent PTR resolutions (negative for unbounded)
    #[arg(long, allow_negative_numbers = true)]
    max_parallel_lookups: Option<i64>,

    /// Pipeline workers
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Upstream DNS server (ip:port), may be repeated
    #[arg(short = 's', long = "server", value_name = "ADDR")]
    servers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit one JSON object per line instead of tab-separated text
    #[arg(long)]
    json: bool,

    /// Addresses to resolve; read from stdin, one per line, when omitted
    addresses: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        ttl_secs: cli.ttl_secs,
        lookup_timeout_ms: cli.lookup_timeout_ms,
        max_parallel_lookups: cli.max_parallel_lookups,
        workers: cli.workers,
        servers: cli.servers.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous rDNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::LookupServices::new(&config)?;

    let shutdown = CancellationToken::new();
    let cleanup_job = CacheCleanupJob::new(services.cache_maintenance.clone())
        .with_interval(config.cache.cleanup_interval_secs);
    let job_handles = JobRunner::new()
        .with_cache_cleanup(cleanup_job)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let (lines, writer) = output::spawn_writer(BufWriter::new(tokio::io::stdout()));
    let sink = LineSink::new(lines, format);

    let cache = services.cache.clone();
    let pipeline = UnorderedPipeline::new(
        sink,
        move |address: String| {
            let cache = cache.clone();
            async move {
                let names = cache.lookup(&address).await;
                vec![ResolvedRecord { address, names }]
            }
        },
        config.pipeline.workers,
    );

    if cli.addresses.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(address) = normalize_address(&line) {
                pipeline.enqueue(address).await;
            }
        }
    } else {
        for arg in &cli.addresses {
            if let Some(address) = normalize_address(arg) {
                pipeline.enqueue(address).await;
            }
        }
    }

    let sink = pipeline.stop().await?;
    let written = sink.written();
    // Dropping the sink closes the line channel so the writer can flush and exit.
    drop(sink);
    writer.await??;

    let report = services.get_stats.execute();
    info!(
        records = written,
        cache_hit = report.stats.cache_hit,
        cache_miss = report.stats.cache_miss,
        cache_expire = report.stats.cache_expire,
        requests_filled = report.stats.requests_filled,
        requests_abandoned = report.stats.requests_abandoned,
        cache_size = report.cache_size,
        hit_rate = report.hit_rate,
        "Lookup statistics"
    );

    shutdown.cancel();
    for handle in job_handles {
        handle.await?;
    }

    info!("Shutdown complete");
    Ok(())
}

/// Trims the line and drops blanks, comments and anything that is not an IP address.
fn normalize_address(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    match trimmed.parse::<IpAddr>() {
        Ok(ip) => Some(ip.to_string()),
        Err(_) => {
            warn!(input = %trimmed, "Skipping invalid IP address");
            None
        }
    }
}
