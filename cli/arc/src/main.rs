//! arc: find archived GitHub repositories among a project's dependencies.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::ArcConfig;

#[derive(Parser)]
#[command(
    name = "arc",
    version,
    about = "List archived GitHub repositories your project depends on"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan go.mod files for archived dependencies
    Gomod {
        /// Also report indirect dependencies
        #[arg(long)]
        indirect: bool,
        /// Directory to scan (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

/// Run the selected command and return the number of archived matches.
fn run(cli: Cli) -> anyhow::Result<usize> {
    match cli.command {
        Commands::Gomod { indirect, dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let start = std::fs::canonicalize(&dir)
                .with_context(|| format!("resolving {}", dir.display()))?;
            let config = ArcConfig::load_or_default(&start)?;
            commands::gomod::run(&dir, &config, indirect)
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_gomod_flags() {
        let cli = Cli::parse_from(["arc", "--debug", "gomod", "--indirect", "--dir", "svc"]);
        assert!(cli.debug);
        match cli.command {
            Commands::Gomod { indirect, dir } => {
                assert!(indirect);
                assert_eq!(dir, Some(PathBuf::from("svc")));
            }
        }
    }

    #[test]
    fn debug_flag_is_global() {
        let cli = Cli::parse_from(["arc", "gomod", "--debug"]);
        assert!(cli.debug);
        match cli.command {
            Commands::Gomod { indirect, dir } => {
                assert!(!indirect);
                assert!(dir.is_none());
            }
        }
    }

    #[test]
    fn run_on_tree_without_github_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("go.mod"),
            "module m\n\nrequire golang.org/x/mod v0.1.0\n",
        )
        .unwrap();

        let cli = Cli {
            debug: false,
            command: Commands::Gomod {
                indirect: true,
                dir: Some(dir.path().to_path_buf()),
            },
        };
        assert_eq!(run(cli).unwrap(), 0);
    }

    #[test]
    fn run_on_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            debug: false,
            command: Commands::Gomod {
                indirect: false,
                dir: Some(dir.path().join("missing")),
            },
        };
        assert!(run(cli).is_err());
    }
}
