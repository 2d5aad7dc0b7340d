//! Command line interface.
//!
//! `serve` runs the orchestrator with an in-process worker pool; `worker`
//! runs only the pool against a remote orchestrator.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Arithmetic expression orchestrator with polling compute workers.
#[derive(Debug, Parser)]
#[command(name = "calc-orchestrator", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file (defaults to ./calc.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enables debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the HTTP orchestrator and its in-process workers.
    Serve {
        /// Address to listen on, overriding config and `CALC_BIND`.
        #[arg(long)]
        bind: Option<String>,

        /// Number of workers, overriding config and `COMPUTING_POWER`.
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Runs a pool of workers polling a remote orchestrator.
    Worker {
        /// Orchestrator base URL, overriding config and `CALC_ORCHESTRATOR_URL`.
        #[arg(long)]
        url: Option<String>,

        /// Number of workers, overriding config and `COMPUTING_POWER`.
        #[arg(long)]
        workers: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_serve_subcommand() {
        let cli = Cli::parse_from(["calc-orchestrator", "serve", "--workers", "3"]);
        match cli.command {
            Command::Serve { bind, workers } => {
                assert!(bind.is_none());
                assert_eq!(workers, Some(3));
            }
            _ => panic!("expected Serve command"),
        }
    }

    #[test]
    fn cli_parses_worker_subcommand() {
        let cli = Cli::parse_from([
            "calc-orchestrator",
            "worker",
            "--url",
            "http://orchestrator:8080",
        ]);
        match cli.command {
            Command::Worker { url, workers } => {
                assert_eq!(url.unwrap(), "http://orchestrator:8080");
                assert!(workers.is_none());
            }
            _ => panic!("expected Worker command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "calc-orchestrator",
            "--config",
            "custom.toml",
            "--verbose",
            "serve",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config.unwrap(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
