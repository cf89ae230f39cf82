// SPDX-License-Identifier: CEPL-1.0
#![deny(unsafe_op_in_unsafe_fn)]
use anyhow::{Context, Result};
use clap::Parser;
use gfx_deps::{ensure_dependencies, CommandFetcher, FetchConfig, FetchError, FetchOutcome};
use gfx_tools_core::{init_tracing, load_cfg};
use std::path::PathBuf;
use tracing::{info, warn};

/// Download and unpack the Vulkan SDK into the dependencies folder if absent.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Purge the folder and fetch again
    #[arg(long)]
    force: bool,
    /// Legacy form: `TRUE` forces a sync
    #[arg(hide = true)]
    legacy: Option<String>,
    /// Config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn forcing(&self) -> bool {
        self.force || self.legacy.as_deref() == Some("TRUE")
    }

    /// Any force argument is announced, even one that does not force.
    fn announces_force(&self) -> bool {
        self.force || self.legacy.is_some()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let cfg = load_cfg(args.config.as_deref());
    if args.announces_force() {
        warn!("Force syncing dependencies.");
    }

    let fetch = FetchConfig::from_cfg(&cfg.dependencies, args.forcing());
    let fetcher = CommandFetcher::from_cfg(&cfg.dependencies);

    match ensure_dependencies(&fetch, &fetcher) {
        Ok(FetchOutcome::Synced) => {
            info!("synced {}", fetch.dir.display());
            Ok(())
        }
        Ok(FetchOutcome::AlreadyPresent) => Ok(()),
        Err(FetchError::ExternalToolFailure { output, .. }) => {
            eprintln!("{output}");
            std::process::exit(1);
        }
        Err(e) => Err(e).with_context(|| format!("sync {}", fetch.dir.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_flag() {
        assert!(Args::try_parse_from(["get_dependencies", "--force"]).unwrap().forcing());
        assert!(!Args::try_parse_from(["get_dependencies"]).unwrap().forcing());
    }

    #[test]
    fn legacy_argument() {
        assert!(Args::try_parse_from(["get_dependencies", "TRUE"]).unwrap().forcing());
        assert!(!Args::try_parse_from(["get_dependencies", "FALSE"]).unwrap().forcing());
        assert!(!Args::try_parse_from(["get_dependencies", "true"]).unwrap().forcing());
    }

    #[test]
    fn force_notice() {
        assert!(Args::try_parse_from(["get_dependencies", "--force"]).unwrap().announces_force());
        assert!(Args::try_parse_from(["get_dependencies", "FALSE"]).unwrap().announces_force());
        assert!(!Args::try_parse_from(["get_dependencies"]).unwrap().announces_force());
    }
}
