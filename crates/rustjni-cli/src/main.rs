use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod commands;
mod logging;

/// RustJNI bridge generator and Android build driver.
///
/// Keeps the external declarations of a Kotlin or Java bridge-host class in
/// step with the exported functions of a Rust library, and cross-compiles
/// that library for every configured Android architecture.
///
/// EXAMPLES:
///     rustjni init --host com.example.app.MainActivity
///     rustjni sync                 Reconcile host and native declarations
///     rustjni build                Sync, compile and collect libraries
///     rustjni build --json         Print a JSON build summary
///     rustjni clean                Remove collected libraries
///
/// ENVIRONMENT VARIABLES:
///     RUSTJNI_LOG                 Log filter (e.g. 'debug', 'rustjni_build=trace')
///     RUSTJNI_CARGO_DIR           Directory holding cargo, rustc and rustup
///     RUSTJNI_NDK_DIR             NDK root directory
///     RUSTJNI_NDK_VERSION         NDK version directory name
///     RUSTJNI_PREBUILT            NDK prebuilt host directory
///     RUSTJNI_TOOLCHAIN_VERSION   Required rustc version
#[derive(Parser)]
#[command(name = "rustjni")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet output (warnings and errors only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the project and scaffold the native library
    ///
    /// Writes rustjni.toml when it is missing, then creates the native
    /// project unless it already exists and synchronizes the host class.
    ///
    /// EXAMPLES:
    ///     rustjni init --host com.example.app.MainActivity
    ///     rustjni init --host com.example.app.MainActivity --android-api 24
    Init {
        /// Fully-qualified bridge-host class (required without rustjni.toml)
        #[arg(long)]
        host: Option<String>,
        /// Native library name
        #[arg(long)]
        lib_name: Option<String>,
        /// Add the four Android architectures linked against this API level
        #[arg(long, value_name = "LEVEL")]
        android_api: Option<u32>,
    },

    /// Synchronize host declarations and native exports
    ///
    /// Adds native stubs for host declarations without an implementation,
    /// then regenerates the host class's generated block from the native
    /// exports. A signature conflict aborts without writing.
    #[command(visible_alias = "s")]
    Sync,

    /// Full build: sync, compile every architecture, collect libraries
    ///
    /// EXAMPLES:
    ///     rustjni build
    ///     rustjni build --json > build.json
    #[command(visible_alias = "b")]
    Build {
        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the collected libraries
    Clean,

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     rustjni completions bash > ~/.local/share/bash-completion/completions/rustjni
    ///     rustjni completions zsh > ~/.zfunc/_rustjni
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init {
            host,
            lib_name,
            android_api,
        } => {
            let args = commands::init::InitArgs {
                project_dir,
                host,
                lib_name,
                android_api,
                quiet: cli.quiet,
            };
            commands::init::run(args)?;
        }
        Commands::Sync => {
            commands::sync::run(&project_dir, cli.quiet)?;
        }
        Commands::Build { json } => {
            let args = commands::build::BuildArgs {
                project_dir,
                json,
                quiet: cli.quiet,
            };
            commands::build::run(args)?;
        }
        Commands::Clean => {
            commands::clean::run(&project_dir, cli.quiet)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
