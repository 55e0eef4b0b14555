use boundq::Core::{init_logging, LogConfig};
use boundq::Endpoints::{ConsoleSink, RandomSource};
use boundq::MPMC::{
    SupervisorBuilder, DEFAULT_CAPACITY, DEFAULT_CONSUMERS, DEFAULT_MAX_PAYLOAD,
    DEFAULT_PRODUCERS,
};
use clap::Parser;
use std::path::PathBuf;

/// Move random payloads from producer threads to consumer threads through one
/// bounded queue.
#[derive(Debug, Parser)]
#[command(name = "boundq", version)]
struct Args {
    /// Maximum number of payloads held by the queue
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Number of producer threads
    #[arg(long, default_value_t = DEFAULT_PRODUCERS)]
    producers: usize,

    /// Number of consumer threads
    #[arg(long, default_value_t = DEFAULT_CONSUMERS)]
    consumers: usize,

    /// Buffer size offered to the source per fetch, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_PAYLOAD)]
    max_payload: usize,

    /// Stop each producer after this many payloads (runs until Ctrl+C otherwise)
    #[arg(long)]
    count: Option<u64>,

    /// Seed for the payload generator; producer i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Log file, appended to
    #[arg(long, default_value = boundq::Core::logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log level spec, e.g. "info" or "boundq=trace"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let _logger = init_logging(&LogConfig {
        level: args.log_level.clone(),
        file: args.log_file.clone(),
        duplicate_to_stderr: true,
    })?;

    let supervisor = SupervisorBuilder::new()
        .with_capacity(args.capacity)
        .with_producers(args.producers)
        .with_consumers(args.consumers)
        .with_max_payload(args.max_payload)
        .with_payloads_per_producer(args.count)
        .build()?;

    let seed = args.seed;
    let handle = supervisor.spawn(
        move |id| match seed {
            Some(seed) => RandomSource::with_seed(seed.wrapping_add(id as u64)),
            None => RandomSource::new(),
        },
        |_| ConsoleSink::stdout(),
    )?;

    // Handle Ctrl+C to drain and stop
    let shutdown = handle.shutdown_signal();
    ctrlc::set_handler(move || {
        shutdown.trigger();
    })?;

    let report = handle.join();
    eprintln!(
        "boundq: {} pushed, {} consumed, {} discarded, {} failed, {} abandoned",
        report.pushed, report.consumed, report.discarded, report.failed, report.abandoned
    );

    if report.panicked > 0 {
        return Err(format!("{} worker threads panicked", report.panicked).into());
    }
    Ok(())
}
