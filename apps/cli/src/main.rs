mod config;
mod context;
mod domains;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
	config::default_data_dir,
	context::{Context, OutputFormat},
	domains::{
		access::AccessCmd, auth::AuthCmd, config::ConfigCmd, faction::FactionCmd, stats::StatsCmd,
	},
};

#[derive(Parser, Debug)]
#[command(name = "bs", version, about = "Battle statistics client")]
struct Cli {
	/// Path to the battlestats data directory
	#[arg(long, global = true)]
	data_dir: Option<PathBuf>,

	/// Server URL, overriding the configured one for this run
	#[arg(long, env = "BS_SERVER_URL", global = true)]
	server: Option<String>,

	/// Output format
	#[arg(long, value_enum, default_value = "human", global = true)]
	format: OutputFormat,

	/// Log debug output to stderr
	#[arg(long, short, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Battle stats dashboard
	#[command(subcommand)]
	Stats(StatsCmd),
	/// Account and session
	#[command(subcommand)]
	Auth(AuthCmd),
	/// Faction management
	#[command(subcommand)]
	Faction(FactionCmd),
	/// Feature access administration
	#[command(subcommand)]
	Access(AccessCmd),
	/// CLI configuration
	#[command(subcommand)]
	Config(ConfigCmd),
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "warn,bs_cli=info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	let data_dir = match cli.data_dir {
		Some(dir) => dir,
		None => default_data_dir()?,
	};
	let context = || Context::load(cli.format, data_dir.clone(), cli.server.clone());

	match cli.command {
		Commands::Stats(cmd) => domains::stats::run(&context()?, cmd).await,
		Commands::Auth(cmd) => domains::auth::run(&mut context()?, cmd).await,
		Commands::Faction(cmd) => domains::faction::run(&context()?, cmd).await,
		Commands::Access(cmd) => domains::access::run(&context()?, cmd).await,
		Commands::Config(cmd) => domains::config::run(&data_dir, cmd),
	}
}
