mod cmd;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, GulpArgs, InstallNodeArgs, NpmInstallArgs, Session};

/// nodekit - provision Node.js and build front-end assets for a project
#[derive(Parser)]
#[command(name = "nodekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project directory all relative paths are resolved against (default: current directory)
  #[arg(short = 'C', long, global = true, env = "NODEKIT_BASE_DIR")]
  base_dir: Option<PathBuf>,

  /// Project configuration file, relative paths are taken from the base directory
  /// (default: <base-dir>/nodekit.toml when present)
  #[arg(long, global = true, env = "NODEKIT_CONFIG")]
  config: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Download and unpack a local Node.js runtime, unless one is already installed
  InstallNode(InstallNodeArgs),

  /// Install project dependencies with the bundled npm
  NpmInstall(NpmInstallArgs),

  /// Run gulp tasks
  Gulp(GulpArgs),

  /// Install Node, install dependencies, run gulp, then an optional downstream command
  Build(BuildArgs),

  /// Show the detected platform, selected archive and runtime location
  Info {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = Session::open(cli.base_dir.as_deref(), cli.config.as_deref()).and_then(|session| match cli.command {
    Commands::InstallNode(args) => cmd::cmd_install_node(&session, args),
    Commands::NpmInstall(args) => cmd::cmd_npm_install(&session, args),
    Commands::Gulp(args) => cmd::cmd_gulp(&session, args),
    Commands::Build(args) => cmd::cmd_build(&session, args),
    Commands::Info { json } => cmd::cmd_info(&session, json),
  });

  if let Err(err) = result {
    output::print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}
