use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use hyperpaper_core::parser::{PageReconciler, ReconcilerConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One text fragment per line
    Text,
    /// A JSON array of strings
    Json,
    /// A JSON array of the matched OCR words with page, rect and confidence
    Boxes,
}

#[derive(Debug, Parser)]
#[command(name = "hyper-paper")]
#[command(about = "Print the OCR text of a page that lies on its body-text lines")]
#[command(version)]
struct Args {
    #[arg(help = "OCR word table written by `pdftotext -tsv`")]
    ocr: PathBuf,

    #[arg(help = "Layout XML with PAGE and LINE elements")]
    layout: PathBuf,

    #[arg(short, long, default_value = "1", help = "Page number to print (1-based)")]
    page: u32,

    #[arg(
        short,
        long,
        default_value = "0.0",
        help = "Margin added around layout lines, as a fraction of the page"
    )]
    tolerance: f64,

    #[arg(long, help = "Drop OCR words below this confidence")]
    min_confidence: Option<f64>,

    #[arg(long, help = "TYPE of the layout lines holding body text")]
    body_type: Option<String>,

    #[arg(long, help = "Only match words against layout lines of the same page")]
    strict_pages: bool,

    #[arg(short, long, value_enum, default_value = "text", help = "Output format")]
    format: OutputFormat,
}

impl Args {
    fn config(&self) -> ReconcilerConfig {
        let mut config = ReconcilerConfig {
            min_confidence: self.min_confidence,
            tolerance: self.tolerance,
            strict_pages: self.strict_pages,
            ..Default::default()
        };
        if let Some(body_type) = &self.body_type {
            config.body_text_type = body_type.clone();
        }
        config
    }
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!("Parsed arguments: {:?}", args);

    if args.tolerance < 0.0 {
        warn!("Negative tolerance {} is ignored", args.tolerance);
    }

    let ocr = std::fs::read(&args.ocr)
        .with_context(|| format!("cannot read OCR table {}", args.ocr.display()))?;
    let layout = std::fs::read(&args.layout)
        .with_context(|| format!("cannot read layout {}", args.layout.display()))?;

    let reconciler = PageReconciler::new(args.config());
    let visible = reconciler
        .visible_boxes(&ocr, &layout, args.page)
        .with_context(|| {
            format!(
                "cannot reconcile {} with {}",
                args.ocr.display(),
                args.layout.display()
            )
        })?;
    info!("Found {} visible text fragments on page {}", visible.len(), args.page);

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => {
            for bounding_box in &visible {
                writeln!(stdout, "{}", bounding_box.text)?;
            }
        }
        OutputFormat::Json => {
            let texts = visible
                .iter()
                .map(|bounding_box| bounding_box.text.as_str())
                .collect::<Vec<_>>();
            serde_json::to_writer(&mut stdout, &texts).context("cannot write JSON output")?;
            writeln!(stdout)?;
        }
        OutputFormat::Boxes => {
            serde_json::to_writer(&mut stdout, &visible).context("cannot write JSON output")?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;

    Ok(())
}
