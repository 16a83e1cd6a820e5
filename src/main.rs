use clap::Parser;
use miette::{IntoDiagnostic, Result};
use orderdesk::application::engine::OrderEngine;
use orderdesk::config::Config;
use orderdesk::infrastructure::in_memory::{
    InMemoryFeedbackStore, InMemoryOrderStore, InMemorySessionStore,
};
use orderdesk::infrastructure::notify::RecordingNotifier;
use orderdesk::interfaces::csv::event_reader::EventReader;
use orderdesk::interfaces::csv::transcript_writer::TranscriptWriter;
use orderdesk::interfaces::dispatch::Dispatcher;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input event script CSV file (kind, actor, data)
    input: PathBuf,

    /// Path to a JSON config file. Defaults mirror the stock deployment.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Admin user ids, added on top of the config's admin set.
    #[arg(long = "admin")]
    admins: Vec<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the stdout transcript stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            serde_json::from_reader::<_, Config>(file).into_diagnostic()?
        }
        None => Config::default(),
    };
    config.admin_ids.extend(cli.admins.iter().copied());

    let notifier = RecordingNotifier::new();
    let engine = OrderEngine::new(
        config,
        Box::new(InMemoryOrderStore::new()),
        Box::new(InMemoryFeedbackStore::new()),
        Box::new(InMemorySessionStore::new()),
        Box::new(notifier.clone()),
    );
    let dispatcher = Dispatcher::new(engine, notifier);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);

    let stdout = io::stdout();
    let mut writer = TranscriptWriter::new(stdout.lock());

    for event_result in reader.events() {
        match event_result {
            Ok(event) => {
                let lines = dispatcher.dispatch(event).await;
                writer.write_lines(&lines).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading event: {e}");
            }
        }
    }

    Ok(())
}
