use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use plagscan::{load_detector, render_outcome, save_submission, PlagscanConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plagscan", version, about = "Flag n-gram overlap between a text and a local corpus")]
struct Cli {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of reference documents (overrides `corpus.dir`).
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Submission to check; read from stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Tokens per n-gram (overrides `detect.n`).
    #[arg(short = 'n', long = "ngram")]
    n: Option<usize>,

    /// Minimum containment ratio to flag a document (overrides `detect.threshold`).
    #[arg(long)]
    threshold: Option<f64>,

    /// Do not save the submission after the run.
    #[arg(long)]
    no_archive: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => PlagscanConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlagscanConfig::default(),
    };
    apply_overrides(&mut cfg, &cli);
    init_tracing(&cfg.log_level, cli.log_json);

    let text = read_submission(cli.input.as_ref())?;
    let detector = load_detector(&cfg).context("building detector")?;

    let output = if cli.json {
        detector
            .report(&text)
            .context("running detection")?
            .to_json_pretty()
            .context("serializing report")?
    } else {
        let outcome = detector.detect(&text).context("running detection")?;
        let evidence = detector.explain(&text, &outcome.result);
        render_outcome(&outcome, &evidence)
    };
    println!("{}", output.trim_end());

    if should_archive(&cfg, &cli) {
        let path = save_submission(&cfg.archive.dir, &text, Local::now().naive_local())
            .context("archiving submission")?;
        eprintln!("Saved submission to {}", path.display());
    }
    Ok(())
}

fn apply_overrides(cfg: &mut PlagscanConfig, cli: &Cli) {
    if let Some(dir) = &cli.corpus {
        cfg.corpus.dir = dir.clone();
    }
    if let Some(n) = cli.n {
        cfg.detect.n = n;
    }
    if let Some(threshold) = cli.threshold {
        cfg.detect.threshold = threshold;
    }
}

fn should_archive(cfg: &PlagscanConfig, cli: &Cli) -> bool {
    cfg.archive.enabled && !cli.no_archive
}

fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_submission(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading submission {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading submission from stdin")?;
            Ok(text)
        }
    }
}
