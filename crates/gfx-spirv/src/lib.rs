// SPDX-License-Identifier: CEPL-1.0
//! GLSL → SPIR-V → embeddable C header.
#![deny(unsafe_op_in_unsafe_fn)]
mod compiler;
mod emit;
mod error;
mod header;
mod ident;
mod words;

pub use compiler::{GlslangCompiler, ShaderCompiler};
#[cfg(feature = "shaderc")]
pub use compiler::ShadercCompiler;
pub use emit::{emit_header, scratch_path, EmitRequest, EmittedHeader};
pub use error::EmitError;
pub use header::{format_header, HeaderOptions, COLUMNS, INDENT};
pub use ident::sanitize_identifier;
pub use words::{decode_words, SPIRV_MAGIC};
