//! edbrowse-scan: run the tag scanner over a file or inline markup.
//!
//! ```text
//! edbrowse-scan page.html             # tree outline
//! edbrowse-scan --events page.html    # raw scanner events
//! edbrowse-scan --head --html '<title>Hi</title>'
//! ```

use anyhow::{Context, bail};
use clap::Parser;
use html::{
    EventLog, ScanReport, Scanner, ScannerConfig, extract_head_metadata, outline,
    parse_document_with,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Scan HTML with the tolerant tag scanner and print what it found.
#[derive(Parser, Debug)]
#[command(name = "edbrowse-scan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HTML file to scan
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Scan this markup instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print one line per scanner event
    #[arg(long, conflicts_with_all = ["tree", "head"])]
    events: bool,

    /// Print the indented tree outline (default)
    #[arg(long, conflicts_with = "head")]
    tree: bool,

    /// Print title, base, meta, and link information from <head>
    #[arg(long)]
    head: bool,

    /// Narrate scanner decisions (trace level on the html.scan target)
    #[arg(long)]
    trace: bool,

    /// Scanner configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    Events,
    Tree,
    Head,
}

impl Cli {
    fn output(&self) -> Output {
        if self.events {
            Output::Events
        } else if self.head {
            Output::Head
        } else {
            Output::Tree
        }
    }

    fn input(&self) -> anyhow::Result<Vec<u8>> {
        if let Some(markup) = &self.html {
            return Ok(markup.clone().into_bytes());
        }
        let Some(path) = &self.path else {
            bail!("nothing to scan: pass a FILE or --html <markup>");
        };
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }

    fn scanner_config(&self) -> anyhow::Result<ScannerConfig> {
        let mut config = match &self.config {
            Some(path) => ScannerConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ScannerConfig::default(),
        };
        config.trace |= self.trace;
        Ok(config)
    }
}

fn init_logging(trace: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if trace {
        builder.filter_module("html.scan", log::LevelFilter::Trace);
    }
    builder.init();
}

fn report_truncation(report: &ScanReport) {
    if let Some(truncation) = report.truncated {
        eprintln!(
            "warning: scan stopped at line {} (offset {}): {}",
            truncation.line, truncation.offset, truncation.kind
        );
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.scanner_config()?;
    let bytes = cli.input()?;
    let input = String::from_utf8_lossy(&bytes);
    let scanner = Scanner::new(config);

    let report = match cli.output() {
        Output::Events => {
            let mut log = EventLog::new();
            let report = scanner.run(&input, &mut log);
            for event in log.events() {
                writeln!(out, "{event}")?;
            }
            report
        }
        Output::Tree => {
            let (doc, report) = parse_document_with(&scanner, &input);
            for line in outline(&doc, usize::MAX) {
                writeln!(out, "{line}")?;
            }
            report
        }
        Output::Head => {
            let (doc, report) = parse_document_with(&scanner, &input);
            let head = extract_head_metadata(&doc);
            if let Some(title) = &head.title {
                writeln!(out, "title: {title}")?;
            }
            if let Some(base) = &head.base_href {
                writeln!(out, "base: {base}")?;
            }
            for meta in &head.meta {
                let key = meta
                    .name
                    .as_deref()
                    .or(meta.http_equiv.as_deref())
                    .unwrap_or("-");
                writeln!(out, "meta {key}: {}", meta.content.as_deref().unwrap_or(""))?;
            }
            for link in &head.links {
                writeln!(
                    out,
                    "link {}: {}",
                    link.rel.join(" "),
                    link.href.as_deref().unwrap_or("")
                )?;
            }
            report
        }
    };

    log::debug!(
        target: "edbrowse",
        "scanned {} lines, {} forced closures, {} discarded end tags, depth {}",
        report.lines,
        report.forced_closures,
        report.discarded_end_tags,
        report.max_depth
    );
    report_truncation(&report);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.trace);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}
