//! Signal Copier - Main Entry Point
//!
//! Listens to a Telegram signal channel and copies each alert into
//! risk-sized orders on a paper trading terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal_macros::dec;
use signal_copier::config::Config;
use signal_copier::order::OrderGenerator;
use signal_copier::pipeline::SignalPipeline;
use signal_copier::risk;
use signal_copier::signal::SignalParser;
use signal_copier::telegram::TelegramListener;
use signal_copier::terminal::{InstrumentMetadata, PaperTerminal};
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Signal Copier CLI
#[derive(Parser)]
#[command(name = "signal-copier")]
#[command(version, about = "Telegram trading-signal copier with risk-based lot sizing")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a message and print the order plan without touching a terminal
    Parse {
        /// Path to a file holding the message; stdin when omitted
        #[arg(short, long)]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    if let Some(Commands::Parse { file }) = cli.command {
        return dry_run_parse(file.as_deref());
    }

    info!("Signal Copier v{} - paper trading", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    config.validate()?;
    anyhow::ensure!(
        !config.telegram.token.is_empty(),
        "telegram token is required to run the listener"
    );

    let allocator = risk::from_config(&config.risk);
    let generator = OrderGenerator::new(allocator);
    let terminal = Arc::new(default_paper_terminal(&config));
    let pipeline = SignalPipeline::connect(generator, terminal).await?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
        shutdown_flag.store(true, Ordering::SeqCst);
    });

    let mut listener = TelegramListener::new(&config.telegram)?;
    listener.run(&pipeline, &shutdown).await
}

/// Paper instrument table: metadata in broker-realistic shapes so sizing
/// behaves like it would against a live symbol table.
fn default_paper_terminal(config: &Config) -> PaperTerminal {
    let gold = InstrumentMetadata {
        tick_value: dec!(1),
        tick_size: dec!(0.01),
        point_size: dec!(0.01),
        volume_step: dec!(0.01),
        volume_min: dec!(0.01),
    };
    let fx = InstrumentMetadata {
        tick_value: dec!(1),
        tick_size: dec!(0.00001),
        point_size: dec!(0.00001),
        volume_step: dec!(0.01),
        volume_min: dec!(0.01),
    };
    PaperTerminal::new(config.terminal.paper_balance)
        .with_instrument("XAUUSDb", gold, dec!(3321.80), dec!(3322.20))
        .with_instrument("EURUSDb", fx, dec!(1.09998), dec!(1.10002))
        .with_instrument("GBPUSDb", fx, dec!(1.24995), dec!(1.25005))
}

/// Run one message through parse/generate and print the plan as JSON.
fn dry_run_parse(file: Option<&str>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let Some(signal) = SignalParser::new().parse(&text) else {
        warn!("Message did not parse as a signal");
        return Ok(());
    };
    println!("{}", serde_json::to_string_pretty(&signal)?);

    let config = Config::load().unwrap_or_default();
    let generator = OrderGenerator::new(risk::from_config(&config.risk));
    let orders = generator.generate(&signal);
    info!(orders = orders.len(), "Order plan");
    println!("{}", serde_json::to_string_pretty(&orders)?);
    Ok(())
}

fn init_logging() -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    std::fs::create_dir_all("logs")?;

    let file_appender = tracing_appender::rolling::hourly("logs", "signal-copier.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the program duration
    Box::leak(Box::new(guard));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("signal_copier=debug".parse()?)
                .add_directive(Level::INFO.into()),
        )
        .with_writer(std::io::stdout.and(file_writer))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .init();

    Ok(())
}
