mod browser;
mod config;
mod models;
mod output;
mod pipeline;
mod scraper;
mod shell;
mod spam;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::browser::SystemBrowser;
use crate::config::{AppConfig, RunConfig};
use crate::pipeline::Pipeline;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "bothunter", about = "Locate spambots in RT forums", version)]
struct Cli {
    /// Forum to search for spam
    #[arg(short, long, default_value = "rwby")]
    forum: String,

    /// Max number of pages to check (default: every page the forum reports)
    #[arg(short, long = "max")]
    max_pages: Option<u32>,

    /// Output file location
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enter interactive shell to process bots
    #[arg(short = 'I', long)]
    interactive: bool,

    /// Do not print progress or the summary to screen
    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            forum: self.forum.clone(),
            max_pages: self.max_pages,
            quiet: self.quiet,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (false, 0) => "bothunter=info,warn",
        (_, 1) => "bothunter=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    let report = Pipeline::new(config).run(&cli.run_config()).await?;
    let summary = report.registry.summary();

    if !cli.quiet && !cli.interactive {
        println!("{}", summary);
    }

    if let Some(path) = &cli.output {
        output::write_summary(path, &summary)?;
    }

    if cli.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        Shell::new(&report.registry, &SystemBrowser::default())
            .run(stdin.lock(), &mut stdout)
            .context("Interactive shell failed")?;
    }

    Ok(())
}
