// SPDX-License-Identifier: CEPL-1.0
#![deny(unsafe_op_in_unsafe_fn)]
pub mod config;
pub mod process;

pub use config::{load_cfg, DepsCfg, ShaderCfg, ToolsCfg};
pub use process::{CommandOutput, CommandRunner, ProcessRunner};

/// Logs go to stderr; stdout may carry the generated header.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
