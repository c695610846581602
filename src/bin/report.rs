//! empdept - report runner

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use empdept::catalog::{Catalog, DataSource, JsonFile};
use empdept::config::{OutputFormat, ReportConfig, DEFAULT_LOG_DIRECTIVE};
use empdept::report::render::render;
use empdept::report::ReportKind;

#[derive(Parser)]
#[command(name = "empdept-report")]
#[command(about = "Run the canned EMP / DEPT / SALGRADE reports", long_about = None)]
struct Cli {
    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Report to run (repeatable); all reports when omitted
    #[arg(short, long = "report")]
    reports: Vec<ReportKind>,

    /// Dataset JSON file; the built-in sample when omitted
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Log directive used when RUST_LOG is unset
    #[arg(long, default_value = DEFAULT_LOG_DIRECTIVE)]
    log: String,

    /// List report names and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli
        .reports
        .iter()
        .fold(ReportConfig::new(), |config, kind| config.report(*kind))
        .format(cli.format)
        .log_directive(cli.log);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        for kind in ReportKind::ALL {
            println!("{:<28} {}", kind.name(), kind.sql());
        }
        return Ok(());
    }

    let catalog = match &cli.data {
        Some(path) => JsonFile::new(path)
            .load()
            .with_context(|| format!("loading dataset {}", path.display()))?,
        None => Catalog::sample()?,
    };

    for kind in config.selected_reports() {
        let value = kind
            .run(&catalog)
            .with_context(|| format!("running report {}", kind))?;

        if config.format == OutputFormat::Table {
            println!("== {} ==", kind);
            println!("{}", kind.sql());
        }
        print!("{}", render(&value, config.format)?);
        println!();
    }

    Ok(())
}
