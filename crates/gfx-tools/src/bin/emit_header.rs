// SPDX-License-Identifier: CEPL-1.0
#![deny(unsafe_op_in_unsafe_fn)]
use anyhow::{bail, Context, Result};
use clap::Parser;
use gfx_spirv::{emit_header, EmitError, EmitRequest, GlslangCompiler, HeaderOptions, ShaderCompiler};
use gfx_tools_core::{init_tracing, load_cfg};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Compile a GLSL shader to SPIR-V and emit a C header embedding the words.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GLSL source file
    shader: PathBuf,
    /// Header to write; empty prints to stdout
    #[arg(default_value = "")]
    output: String,
    /// glslangValidator executable (falls back to the config file)
    compiler: Option<PathBuf>,
    /// Choose compiler backend: glslang | shaderc
    #[arg(long, default_value = "glslang")]
    backend: String,
    /// Config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn output_path(arg: &str) -> Option<PathBuf> {
    (!arg.is_empty()).then(|| PathBuf::from(arg))
}

fn make_compiler(args: &Args, default_exe: PathBuf) -> Result<Box<dyn ShaderCompiler>> {
    match args.backend.as_str() {
        "glslang" => {
            let exe = args.compiler.clone().unwrap_or(default_exe);
            info!("compiler = {}", exe.display());
            Ok(Box::new(GlslangCompiler::new(exe)))
        }
        #[cfg(feature = "shaderc")]
        "shaderc" => Ok(Box::new(gfx_spirv::ShadercCompiler)),
        other => bail!("unsupported backend {other:?}"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let cfg = load_cfg(args.config.as_deref());

    let compiler = make_compiler(&args, cfg.shader.compiler.clone())?;
    let req = EmitRequest {
        source: args.shader.clone(),
        output: output_path(&args.output),
        scratch_dir: cfg.shader.scratch_dir.clone(),
        options: HeaderOptions {
            banner: cfg.shader.banner.clone(),
        },
    };

    match emit_header(&req, compiler.as_ref()) {
        Ok(header) => {
            if header.written_to.is_none() {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(header.text.as_bytes())?;
                stdout.flush()?;
            }
            Ok(())
        }
        Err(EmitError::ExternalToolFailure { output, .. }) => {
            eprintln!("{output}");
            std::process::exit(1);
        }
        Err(e) => Err(e).with_context(|| format!("emit header for {}", args.shader.display())),
    }
}
