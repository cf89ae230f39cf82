// SPDX-License-Identifier: CEPL-1.0
use crate::{decode_words, format_header, sanitize_identifier, EmitError, HeaderOptions, ShaderCompiler};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct EmitRequest {
    pub source: PathBuf,
    /// `None` leaves the text to the caller (stdout).
    pub output: Option<PathBuf>,
    pub scratch_dir: PathBuf,
    pub options: HeaderOptions,
}

#[derive(Clone, Debug)]
pub struct EmittedHeader {
    pub symbol: String,
    pub word_count: usize,
    pub text: String,
    pub written_to: Option<PathBuf>,
}

fn basename(source: &Path) -> String {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<scratch_dir>/<basename>.tmp`. Shared by runs on the same basename.
pub fn scratch_path(scratch_dir: &Path, source: &Path) -> PathBuf {
    scratch_dir.join(format!("{}.tmp", basename(source)))
}

/// Compile, decode and render one shader. The scratch file is removed only
/// after a successful decode; nothing is written unless every step succeeds.
pub fn emit_header(req: &EmitRequest, compiler: &dyn ShaderCompiler) -> Result<EmittedHeader, EmitError> {
    let base = basename(&req.source);
    let scratch = scratch_path(&req.scratch_dir, &req.source);

    let report = compiler.compile(&req.source, &scratch)?;
    let bytes = fs::read(&scratch).map_err(|e| EmitError::io(&scratch, e))?;
    let words = decode_words(&bytes)?;
    fs::remove_file(&scratch).map_err(|e| EmitError::io(&scratch, e))?;
    debug!("{}: {} words", base, words.len());

    let symbol = sanitize_identifier(&base);
    let text = format_header(&words, &report, &symbol, &req.options);

    if let Some(out) = &req.output {
        fs::write(out, &text).map_err(|e| EmitError::io(out, e))?;
        info!("wrote {} ({} words) to {}", symbol, words.len(), out.display());
    }

    Ok(EmittedHeader {
        symbol,
        word_count: words.len(),
        text,
        written_to: req.output.clone(),
    })
}
