use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "strata", version)]
struct Cli {
    /// Most verbose log level written to stderr.
    #[arg(long, global = true, default_value_t = tracing::Level::WARN)]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in eras and their container selectors.
    Eras(ErasArgs),
    /// Play one era headlessly and print the resulting state as JSON.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ErasArgs {
    /// Stage configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Era to play (`strata eras` lists them).
    #[arg(long)]
    era: String,

    /// Stop ticking at this time (milliseconds since the section entered view).
    #[arg(long, default_value_t = 4000.0)]
    until: f64,

    /// Frame interval; overrides the configuration.
    #[arg(long)]
    frame_ms: Option<f64>,

    /// Random seed; overrides the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Scroll the section out of view at this time.
    #[arg(long)]
    reset_at: Option<f64>,

    /// Leave this era's container off the surface (repeatable).
    #[arg(long)]
    missing: Vec<String>,

    /// Stage configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlayOutput {
    config: strata::StageConfig,
    ticks: u64,
    completed_at_ms: Option<f64>,
    reset_at_ms: Option<f64>,
    report: Option<strata::EraReport>,
    elements: Option<strata::ElementDump>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Eras(args) => cmd_eras(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<strata::StageConfig> {
    let Some(path) = path else {
        return Ok(strata::StageConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("open stage config '{}'", path.display()))?;
    let config = strata::StageConfig::from_json(&json)
        .with_context(|| format!("parse stage config '{}'", path.display()))?;
    Ok(config)
}

fn cmd_eras(args: ErasArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    for era in strata::ERAS {
        println!("{era}\t{}", config.selector(era));
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !strata::ERAS.contains(&args.era.as_str()) {
        anyhow::bail!(
            "unknown era '{}' (expected one of: {})",
            args.era,
            strata::ERAS.join(", ")
        );
    }
    if !args.until.is_finite() || args.until < 0.0 {
        anyhow::bail!("--until must be a non-negative time, got {}", args.until);
    }

    let mut config = read_config(args.config.as_deref())?;
    if let Some(frame_ms) = args.frame_ms {
        config.frame_ms = frame_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let selectors: Vec<String> = strata::ERAS
        .iter()
        .filter(|era| !args.missing.iter().any(|m| m == *era))
        .map(|era| config.selector(era))
        .collect();
    let surface = strata::MemorySurface::with_containers(selectors.iter().map(String::as_str));

    let mut stage = strata::Stage::new(surface, config.clone());
    let bound = stage.install_builtin();
    tracing::info!(bound, "vignettes installed");

    stage.on_enter(&args.era, strata::ScrollDirection::Down);

    let mut ticks = 0u64;
    let mut completed_at_ms = None;
    let mut reset_at_ms = None;
    loop {
        let now_ms = ticks as f64 * config.frame_ms;
        if now_ms > args.until {
            break;
        }
        let report = stage.tick(now_ms);
        ticks += 1;
        if completed_at_ms.is_none() && report.completed.iter().any(|e| e.as_str() == args.era) {
            completed_at_ms = Some(now_ms);
        }
        if let Some(at) = args.reset_at
            && reset_at_ms.is_none()
            && now_ms >= at
        {
            stage.on_exit(&args.era, strata::ScrollDirection::Up);
            reset_at_ms = Some(now_ms);
        }
    }

    let report = stage.report(&args.era);
    let elements = report
        .as_ref()
        .and_then(|r| stage.surface().dump(r.root));
    if report.is_none() {
        eprintln!("era '{}' has no container; nothing played", args.era);
    }

    let output = PlayOutput {
        config,
        ticks,
        completed_at_ms,
        reset_at_ms,
        report,
        elements,
    };
    let json = serde_json::to_string_pretty(&output).context("serialize play report")?;
    println!("{json}");
    Ok(())
}
