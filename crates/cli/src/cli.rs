use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Replay interaction scripts against Vitrine page behaviors")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Run a script against a page fixture, printing one JSON snapshot per step
	Replay {
		/// Page fixture (JSON element tree and viewport)
		#[arg(long, value_name = "PATH")]
		page: PathBuf,

		/// Script of steps to apply (JSON array)
		#[arg(long, value_name = "PATH")]
		script: PathBuf,

		/// Site configuration (TOML); built-in defaults when omitted
		#[arg(long, value_name = "PATH")]
		config: Option<PathBuf>,
	},
	/// Print the effective site configuration as TOML
	Config {
		/// Site configuration (TOML); built-in defaults when omitted
		#[arg(long, value_name = "PATH")]
		config: Option<PathBuf>,
	},
}

impl Cli {
	/// Default log filter for the requested verbosity.
	pub fn log_filter(&self) -> &'static str {
		match self.verbose {
			0 => "warn",
			1 => "info",
			2 => "debug",
			_ => "trace",
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn definition_is_consistent() {
		Cli::command().debug_assert();
	}

	#[test]
	fn verbosity_counts() {
		let cli = Cli::parse_from(["vitrine", "-vv", "config"]);
		assert_eq!(cli.log_filter(), "debug");
		let cli = Cli::parse_from(["vitrine", "replay", "--page", "p.json", "--script", "s.json"]);
		assert_eq!(cli.log_filter(), "warn");
		assert!(matches!(cli.command, Command::Replay { config: None, .. }));
	}
}
