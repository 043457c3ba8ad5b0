use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use futures_util::StreamExt;
use tango_anki::{AnkiConnectClient, NoteModel};
use tango_config::Config;
use tango_types::EnrichedTerm;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod io;

const DEBUG_FILTER: &str =
    "info,tango_app=debug,tango_core=debug,tango_sources=debug,tango_lang_japanese=debug";

/// Enrich a list of Japanese terms into flashcard records
#[derive(Parser, Debug)]
#[command(name = "tango")]
#[command(version)]
struct Args {
    /// Term list, one term per line (first cell of `;`, `,` or TAB separated rows)
    terms: PathBuf,

    /// Write JSON lines here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log raw upstream payloads and parsed fields
    #[arg(long)]
    debug: bool,

    /// Push every record to AnkiConnect
    #[arg(long)]
    anki: bool,

    /// Terms resolved concurrently
    #[arg(short, long)]
    workers: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(debug: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| if debug { DEBUG_FILTER.into() } else { "info".into() });
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[derive(Debug, Default)]
struct Summary {
    resolved: usize,
    with_definition: usize,
    with_example: usize,
    with_image: usize,
}

#[derive(Debug, Default)]
struct NoteTally {
    added: usize,
    failed: usize,
}

/// Add notes as records arrive, until the sender is dropped
fn spawn_note_writer(
    client: AnkiConnectClient,
    model: NoteModel,
    deck: String,
    media_dir: PathBuf,
) -> (mpsc::UnboundedSender<EnrichedTerm>, JoinHandle<NoteTally>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<EnrichedTerm>();

    let handle = tokio::spawn(async move {
        let mut tally = NoteTally::default();
        while let Some(record) = rx.recv().await {
            add_note(&client, &model, &deck, &media_dir, &record, &mut tally).await;
        }
        tally
    });

    (tx, handle)
}

async fn add_note(
    client: &AnkiConnectClient,
    model: &NoteModel,
    deck: &str,
    media_dir: &Path,
    record: &EnrichedTerm,
    tally: &mut NoteTally,
) {
    match tango_anki::add_card(client, model, deck, record, media_dir).await {
        Ok(id) => {
            tracing::debug!("Added note {} for '{}'", id, record.term);
            tally.added += 1;
        }
        Err(e) => {
            tracing::error!("Failed to add note for '{}': {:#}", record.term, e);
            tally.failed += 1;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_json = args.log_json || tango_config::env_flag("TANGO_LOG_JSON");
    init_tracing(args.debug, log_json);

    let mut config = Config::new();
    config.debug |= args.debug;
    config.anki.enabled |= args.anki;
    if let Some(workers) = args.workers {
        config.network.workers = workers;
    }

    let terms = io::read_terms(&args.terms)?;
    let resolver = tango_lang_japanese::build_resolver(&config)
        .context("Failed to set up HTTP sources")?;

    let anki = if config.anki.enabled {
        let client = AnkiConnectClient::new(config.anki.url.clone());
        let model = NoteModel::vocabulary(config.anki.model.clone());
        tango_anki::prepare(&client, &model, &config.anki.deck)
            .await
            .with_context(|| format!("AnkiConnect at {} is not usable", config.anki.url))?;
        Some(spawn_note_writer(
            client,
            model,
            config.anki.deck.clone(),
            config.media.dir.clone(),
        ))
    } else {
        None
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, finishing terms already in flight");
                cancel.cancel();
            }
        }
    });

    let total = terms.len();
    let mut summary = Summary::default();
    let records = resolver.resolve_stream(terms, config.network.workers, cancel);
    tokio::pin!(records);

    while let Some(record) = records.next().await {
        io::write_record(&mut out, &record)?;

        summary.resolved += 1;
        summary.with_definition += usize::from(!record.definition_jp.is_empty());
        summary.with_example += usize::from(!record.example_jp.is_empty());
        summary.with_image += usize::from(!record.image_ref.is_empty());

        if let Some((notes, _)) = &anki {
            if notes.send(record).is_err() {
                tracing::error!("Note writer stopped, no further notes will be added");
            }
        }
    }

    out.flush()?;

    tracing::info!(
        "Resolved {}/{} terms: {} with definition, {} with example, {} with image",
        summary.resolved,
        total,
        summary.with_definition,
        summary.with_example,
        summary.with_image
    );
    if let Some((notes, writer)) = anki {
        drop(notes);
        let tally = writer.await.context("Note writer panicked")?;
        tracing::info!("Anki: {} notes added, {} failed", tally.added, tally.failed);
    }

    Ok(())
}
