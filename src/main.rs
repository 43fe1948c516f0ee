use anyhow::Result;
use clap::Parser;
use scriptdist::descriptor::DEFAULT_MANIFEST;
use scriptdist::install;
use std::path::PathBuf;

/// scriptdist - declare and install executable scripts
///
/// Reads a TOML descriptor manifest declaring package metadata and a list of
/// script files, and installs those scripts as commands on the executable
/// search path.
///
/// Examples:
///   scriptdist install              # Install scripts from ./scriptdist.toml
///   scriptdist list                 # Show what is installed
#[derive(Parser, Debug)]
#[command(author, version = env!("SCRIPTDIST_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Bin directory to install into (overrides defaults; also via SCRIPTDIST_BIN)
    #[arg(
        long = "bin-dir",
        short = 'b',
        env = "SCRIPTDIST_BIN",
        value_name = "PATH",
        global = true
    )]
    pub bin_dir: Option<PathBuf>,

    /// Path to the descriptor manifest
    #[arg(
        long = "manifest",
        short = 'm',
        value_name = "PATH",
        default_value = DEFAULT_MANIFEST,
        global = true
    )]
    pub manifest: PathBuf,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the descriptor's metadata
    Show,

    /// Validate the descriptor and verify all declared scripts exist
    Check,

    /// Install the declared scripts into the bin directory
    Install(InstallArgs),

    /// Remove an installed package's commands
    Uninstall(UninstallArgs),

    /// List installed packages
    List,
}

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Overwrite existing commands not installed by scriptdist
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct UninstallArgs {
    /// The package name to uninstall
    #[arg(value_name = "NAME")]
    pub package: String,

    /// Skip the confirmation prompt
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = scriptdist::runtime::RealRuntime;

    match cli.command {
        Commands::Show => install::show(runtime, &cli.manifest)?,
        Commands::Check => install::check(runtime, &cli.manifest)?,
        Commands::Install(args) => {
            install::install(runtime, &cli.manifest, cli.bin_dir, args.force)?
        }
        Commands::Uninstall(args) => {
            install::uninstall(runtime, &args.package, cli.bin_dir, args.yes)?
        }
        Commands::List => install::list(runtime, cli.bin_dir)?,
    }
    Ok(())
}
