// SPDX-License-Identifier: CEPL-1.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("{program} exited with status {status:?}")]
    ExternalToolFailure {
        program: String,
        status: Option<i32>,
        /// Captured tool output, forwarded verbatim to stderr by the caller.
        output: String,
    },
    #[error("malformed SPIR-V binary: {len} bytes is not a positive multiple of 4")]
    MalformedBinary { len: usize },
    #[error("invalid SPIR-V magic {found:#010x}")]
    InvalidMagic { found: u32 },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EmitError::Io {
            path: path.into(),
            source,
        }
    }
}
