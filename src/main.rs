//! Ava - headless driver
//!
//! Replays newline-delimited JSON segments against an in-memory page and a
//! simulated browser, then prints the dialogue and the resulting state.

use ava::assistant::{spawn_assistant, Assistant};
use ava::command::Segment;
use ava::core::error::Result;
use ava::core::types::{TabId, Viewport};
use ava::core::AssistantConfig;
use ava::page::{HeadlessPage, Page};
use ava::relay::{spawn_relay, BackgroundRelay, SimulatedBrowser};
use ava::tags::{Document, DomEvent, Element, AVA_ATTRIBUTE};
use ava::ui::Speaker;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::runtime::Runtime;

/// Ava headless driver - replay recognizer segments
#[derive(Parser, Debug)]
#[command(name = "ava")]
#[command(about = "Run recognizer segments through the Ava command pipeline")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Segment file, one JSON segment per line (stdin when absent)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Location of the simulated page
    #[arg(long, default_value = "https://example.test")]
    url: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose { "ava=debug" } else { "ava=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config, CLI seed wins
    let mut config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None => AssistantConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rt = Runtime::new()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: AssistantConfig) -> Result<()> {
    tracing::info!("Ava starting on {}", args.url);

    // Background side: simulated browser behind the relay task
    let browser = Arc::new(SimulatedBrowser::with_tabs(&[args.url.as_str()]));
    let relay = BackgroundRelay::new(Arc::clone(&browser), ava::lexicon::Lexicon::new(config.lexicon_matching));
    let (client, relay_task) = spawn_relay(relay, &config);

    // Port that tells this tab when it loses focus
    let activity = match config.sender_tab {
        Some(tab) => Some(client.connect(TabId(tab)).await?),
        None => None,
    };

    // Content side: demo page and the assistant session
    let viewport = Viewport::default();
    let page = HeadlessPage::new(viewport, &args.url).with_document(demo_document(viewport));
    let mut assistant = Assistant::new(page, client, &config);
    assistant.start_listening();
    let (segments, session) = spawn_assistant(assistant, activity);

    // Read input
    let reader: Box<dyn AsyncRead + Unpin + Send> = match &args.input {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    };
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        // Skip blanks and comments
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Handle quit command
        if line == "quit" || line == "q" {
            break;
        }

        // Queue the segment; this waits while a dispatch is in flight
        match Segment::from_json(line) {
            Ok(segment) => {
                if segments.send(segment).await.is_err() {
                    tracing::warn!("Session ended early");
                    break;
                }
            }
            Err(e) => tracing::warn!("Skipping malformed segment: {}", e),
        }
    }

    // Closing the queue ends the session loop
    drop(segments);

    let mut assistant = session.await.map_err(std::io::Error::other)?;
    relay_task.abort();

    // Report
    let events = assistant.page_mut().document_mut().take_events();
    print_report(&assistant, &browser, &events).await;
    Ok(())
}

async fn print_report(
    assistant: &Assistant<HeadlessPage>,
    browser: &SimulatedBrowser,
    events: &[DomEvent],
) {
    println!("\n=== TRANSCRIPT ===");
    for line in assistant.transcript().lines() {
        let speaker = match line.speaker {
            Speaker::Ava => "AVA ",
            Speaker::User => "USER",
        };
        println!("  {} | {}", speaker, line.text);
    }

    let ui = assistant.ui();
    let page = assistant.page();
    let (scroll_x, scroll_y) = page.scroll_position();
    println!("\n=== PAGE ===");
    println!("  Location: {}", page.location());
    println!("  Scroll:   ({:.0}, {:.0})", scroll_x, scroll_y);
    println!("  Ava:      {}", ui.ava_position.as_str());
    println!(
        "  Tags:     {} shown ({})",
        assistant.overlay().tags().len(),
        if ui.show_tag { "visible" } else { "hidden" }
    );
    for entry in assistant.overlay().modal_entries() {
        println!("    {}", entry);
    }
    if let Some(input) = assistant.overlay().focused_input() {
        if let Some(element) = page.document().get(input) {
            println!("  Focused input value: {:?}", element.value);
        }
    }

    for event in events {
        println!("  Event:    {:?}", event);
    }

    let snapshot = browser.snapshot().await;
    println!("\n=== BROWSER ===");
    for tab in &snapshot.tabs {
        let marker = if Some(tab.id) == snapshot.active { "*" } else { " " };
        println!("  {} {} [window {}] {}", marker, tab.id, tab.window, tab.url());
    }
    for (query, disposition) in &snapshot.searches {
        println!("  searched {:?} ({:?})", query, disposition);
    }
}

/// A small page with a nav bar, a search form and a long article
fn demo_document(viewport: Viewport) -> Document {
    let mut doc = Document::new(viewport.rect());
    let body = doc.body();
    if let Some(element) = doc.get_mut(body) {
        element.scroll_height = 2400.0;
    }

    let nav = doc.append(body, Element::new("nav").rect(0.0, 0.0, viewport.width, 48.0));
    doc.append(nav, Element::new("a").text("Home").rect(16.0, 12.0, 60.0, 24.0));
    doc.append(nav, Element::new("a").text("Docs").rect(92.0, 12.0, 60.0, 24.0));
    doc.append(
        nav,
        Element::new("div")
            .attr("role", "button")
            .attr("aria-label", "Menu")
            .rect(viewport.width - 56.0, 8.0, 40.0, 32.0),
    );

    let form = doc.append(body, Element::new("form").rect(16.0, 80.0, 480.0, 48.0));
    doc.append(
        form,
        Element::new("input")
            .attr("type", "text")
            .attr("placeholder", "Search the docs")
            .rect(16.0, 88.0, 360.0, 32.0),
    );
    doc.append(form, Element::new("button").text("Go").rect(392.0, 88.0, 80.0, 32.0));

    doc.append(
        body,
        Element::new("article")
            .text("Getting started")
            .rect(16.0, 160.0, viewport.width - 32.0, 2200.0),
    );
    doc.append(
        body,
        Element::new("a").text("Footer link").rect(16.0, 2360.0, 120.0, 24.0),
    );

    doc.append(
        body,
        Element::new("div")
            .attr(AVA_ATTRIBUTE, "root")
            .rect(0.0, 0.0, 1.0, 1.0),
    );
    doc
}
