//! Marginalia - reading surface replay host
//!
//! Feeds a scripted sequence of touch, selection and chat events into a
//! reading surface and prints the effects and the final screen as JSON.
//!
//! Usage: `marginalia <script.json> [--settings <reader_settings.json>]`

mod script;

use anyhow::Context;
use reading_engine::{
    CannedResponder, Duration, Effect, MemoryClipboard, ReaderSettings, ReadingSurface,
    SettingsManager, SurfaceView, TimerKind,
};
use script::Script;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// What happened at one point of the replay
#[derive(Debug, Serialize)]
struct ReplayEntry {
    at_ms: u64,
    fired: Vec<TimerKind>,
    effects: Vec<Effect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ReplayReport<'a> {
    log: Vec<ReplayEntry>,
    view: SurfaceView<'a>,
    clipboard: Option<&'a str>,
}

struct Args {
    script: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut script = None;
    let mut settings = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings needs a path")?;
                settings = Some(PathBuf::from(path));
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    Ok(Args {
        script: script.context("usage: marginalia <script.json> [--settings <path>]")?,
        settings,
    })
}

fn load_settings(path: Option<PathBuf>) -> anyhow::Result<ReaderSettings> {
    match path {
        Some(path) => {
            let mut manager = SettingsManager::with_path(path);
            Ok(manager.load()?.clone())
        }
        None => Ok(ReaderSettings::default()),
    }
}

fn run() -> anyhow::Result<()> {
    let args = parse_args()?;
    let script = Script::load(&args.script)
        .with_context(|| format!("failed to load script {}", args.script.display()))?;
    script.validate()?;
    let settings = load_settings(args.settings)?;

    tracing::info!(
        title = %script.document.title,
        paragraphs = script.document.len(),
        steps = script.steps.len(),
        "Replaying script"
    );

    let end_ms = script.end_ms();
    let mut surface = ReadingSurface::new(
        script.document,
        settings,
        script.viewport,
        MemoryClipboard::default(),
        CannedResponder,
    );

    let mut log = Vec::with_capacity(script.steps.len() + 1);
    for step in script.steps {
        let now = Duration::from_millis(step.at_ms);
        // Timers due before the event fire first, and are reported on their own
        let fired = surface.tick(now);
        let entry = match surface.handle(step.event, now) {
            Ok(effects) => ReplayEntry {
                at_ms: step.at_ms,
                fired,
                effects,
                error: None,
            },
            Err(e) => {
                tracing::warn!("Event at {}ms rejected: {}", step.at_ms, e);
                ReplayEntry {
                    at_ms: step.at_ms,
                    fired,
                    effects: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };
        log.push(entry);
    }

    let fired = surface.tick(Duration::from_millis(end_ms));
    if !fired.is_empty() {
        log.push(ReplayEntry {
            at_ms: end_ms,
            fired,
            effects: Vec::new(),
            error: None,
        });
    }

    let output = ReplayReport {
        log,
        view: surface.view(),
        clipboard: surface.clipboard().contents(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        tracing::error!("Replay failed: {:#}", e);
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
