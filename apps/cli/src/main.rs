use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use od_config::ConsoleConfig;
use od_core::{logging, Console};

mod context;
mod domains;

use context::{Context, OutputFormat};
use domains::config::ConfigCmd;

#[derive(Parser, Debug)]
#[command(name = "opsdesk", about = "Opsdesk administration console")]
struct Cli {
	/// Path to the opsdesk data directory
	#[arg(long)]
	data_dir: Option<PathBuf>,

	/// Backend root URL, overrides the configured one
	#[arg(long)]
	api_url: Option<String>,

	/// Output format
	#[arg(long, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	#[command(flatten)]
	Backend(BackendCmd),
	/// Console configuration
	#[command(subcommand)]
	Config(ConfigCmd),
}

/// Commands that talk to the backend.
#[derive(Subcommand, Debug)]
enum BackendCmd {
	/// List the configured screens
	Screens,
	/// Show one page of a screen's records
	List {
		screen: String,
		/// Zero-based page index
		#[arg(long, default_value_t = 0)]
		page: usize,
		/// Rows per page, defaults to the configured page size
		#[arg(long)]
		size: Option<usize>,
	},
	/// Show one record of a screen
	View { screen: String, id: i64 },
	/// Delete one record of a screen
	Delete { screen: String, id: i64 },
	/// Show an owner with its address and projects
	Owner { id: i64 },
	/// Show a project with its address, owners and files
	Project { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let data_dir = match cli.data_dir {
		Some(dir) => dir,
		None => od_config::default_data_dir()?,
	};

	let mut config = ConsoleConfig::load_from(&data_dir)?;
	config.override_api_url(cli.api_url);

	let _guard = logging::init(&config.logs_dir(), &config.log_level)?;

	match cli.command {
		Commands::Config(cmd) => domains::config::run(config, cmd),
		Commands::Backend(cmd) => {
			let ctx = Context::new(Console::connect(config)?, cli.format);
			run(&ctx, cmd).await
		}
	}
}

async fn run(ctx: &Context, cmd: BackendCmd) -> Result<()> {
	match cmd {
		BackendCmd::Screens => domains::screen::screens(ctx),
		BackendCmd::List { screen, page, size } => {
			domains::screen::list(ctx, &screen, page, size).await
		}
		BackendCmd::View { screen, id } => domains::screen::view(ctx, &screen, id).await,
		BackendCmd::Delete { screen, id } => domains::screen::delete(ctx, &screen, id).await,
		BackendCmd::Owner { id } => domains::entity::owner(ctx, id).await,
		BackendCmd::Project { id } => domains::entity::project(ctx, id).await,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use clap::CommandFactory;

	#[test]
	fn test_cli_definition() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_config_commands_are_separate_from_backend_commands() {
		let cli = Cli::try_parse_from(["opsdesk", "config", "set", "page_size", "20"]).unwrap();
		assert!(matches!(
			cli.command,
			Commands::Config(ConfigCmd::Set { ref key, .. }) if key == "page_size"
		));

		let cli = Cli::try_parse_from(["opsdesk", "list", "tickets", "--page", "2"]).unwrap();
		assert!(matches!(
			cli.command,
			Commands::Backend(BackendCmd::List { page: 2, size: None, .. })
		));

		let cli = Cli::try_parse_from(["opsdesk", "--format", "json", "owner", "4"]).unwrap();
		assert!(matches!(cli.command, Commands::Backend(BackendCmd::Owner { id: 4 })));
	}
}
