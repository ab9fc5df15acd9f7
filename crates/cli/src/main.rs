//! `vitrine` replay harness.
//!
//! Builds an in-memory page from a JSON fixture, installs the site
//! behaviors on it, and replays a scripted sequence of clicks, keys, focus
//! moves, resizes, scrolls, hovers and clock ticks, printing the observable
//! page state after each step as one JSON object per line.

mod cli;
mod fixture;
mod script;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vitrine_site::{Site, SiteConfig};

use crate::cli::{Cli, Command};
use crate::fixture::PageFixture;
use crate::script::Snapshot;

fn main() -> Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.log_filter());

	match cli.command {
		Command::Replay {
			page,
			script,
			config,
		} => {
			let snapshots = run_replay(&page, &script, config.as_deref())?;
			let mut out = std::io::stdout().lock();
			for snapshot in &snapshots {
				serde_json::to_writer(&mut out, snapshot)?;
				writeln!(out)?;
			}
		}
		Command::Config { config } => {
			let config = load_config(config.as_deref())?;
			print!("{}", toml::to_string_pretty(&config)?);
		}
	}
	Ok(())
}

fn setup_tracing(default_filter: &str) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("VITRINE_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
	match path {
		Some(path) => SiteConfig::load(path).with_context(|| format!("loading {}", path.display())),
		None => Ok(SiteConfig::default()),
	}
}

fn run_replay(page: &Path, script: &Path, config: Option<&Path>) -> Result<Vec<Snapshot>> {
	let config = load_config(config)?;

	let source = std::fs::read_to_string(page).with_context(|| format!("reading {}", page.display()))?;
	let fixture = PageFixture::from_json(&source).with_context(|| format!("parsing {}", page.display()))?;
	let mut doc = fixture.build();

	let source = std::fs::read_to_string(script).with_context(|| format!("reading {}", script.display()))?;
	let steps = script::parse(&source).with_context(|| format!("parsing {}", script.display()))?;

	let mut site = Site::init(&mut doc, &config).context("initializing site")?;
	info!(steps = steps.len(), overlays = site.overlays().len(), "replaying");
	script::replay(&mut doc, &mut site, &steps)
}
