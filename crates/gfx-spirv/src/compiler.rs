// SPDX-License-Identifier: CEPL-1.0
use crate::EmitError;
use gfx_tools_core::{CommandRunner, ProcessRunner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Compiles one GLSL source into a SPIR-V file and returns the tool's report.
pub trait ShaderCompiler {
    fn compile(&self, source: &Path, spirv_out: &Path) -> Result<String, EmitError>;
}

/// `glslangValidator -V -H -o <out> <src>` run through a [`CommandRunner`].
pub struct GlslangCompiler<R: CommandRunner = ProcessRunner> {
    exe: PathBuf,
    runner: R,
}

impl GlslangCompiler<ProcessRunner> {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self::with_runner(exe, ProcessRunner)
    }
}

impl<R: CommandRunner> GlslangCompiler<R> {
    pub fn with_runner(exe: impl Into<PathBuf>, runner: R) -> Self {
        GlslangCompiler {
            exe: exe.into(),
            runner,
        }
    }

    pub fn args(source: &Path, spirv_out: &Path) -> Vec<OsString> {
        vec![
            "-V".into(),
            "-H".into(),
            "-o".into(),
            spirv_out.as_os_str().to_owned(),
            source.as_os_str().to_owned(),
        ]
    }
}

impl<R: CommandRunner> ShaderCompiler for GlslangCompiler<R> {
    fn compile(&self, source: &Path, spirv_out: &Path) -> Result<String, EmitError> {
        info!("compiling {}", source.display());
        let out = self
            .runner
            .run(&self.exe, &Self::args(source, spirv_out))
            .map_err(|e| EmitError::io(&self.exe, e))?;

        if !out.success {
            return Err(EmitError::ExternalToolFailure {
                program: self.exe.display().to_string(),
                status: out.status,
                output: out.combined(),
            });
        }
        debug!("{} report: {} bytes", self.exe.display(), out.stdout.len());
        Ok(out.stdout.trim_end().to_string())
    }
}

/// In-process compilation through shaderc. The report is the SPIR-V assembly.
#[cfg(feature = "shaderc")]
#[derive(Default)]
pub struct ShadercCompiler;

#[cfg(feature = "shaderc")]
impl ShadercCompiler {
    fn kind(source: &Path) -> shaderc::ShaderKind {
        match source.extension().and_then(|e| e.to_str()) {
            Some("vert") => shaderc::ShaderKind::Vertex,
            Some("frag") => shaderc::ShaderKind::Fragment,
            Some("comp") => shaderc::ShaderKind::Compute,
            Some("geom") => shaderc::ShaderKind::Geometry,
            Some("tesc") => shaderc::ShaderKind::TessControl,
            Some("tese") => shaderc::ShaderKind::TessEvaluation,
            _ => shaderc::ShaderKind::InferFromSource,
        }
    }
}

#[cfg(feature = "shaderc")]
impl ShaderCompiler for ShadercCompiler {
    fn compile(&self, source: &Path, spirv_out: &Path) -> Result<String, EmitError> {
        let fail = |e: shaderc::Error| EmitError::ExternalToolFailure {
            program: "shaderc".to_string(),
            status: None,
            output: e.to_string(),
        };

        let text = std::fs::read_to_string(source).map_err(|e| EmitError::io(source, e))?;
        let name = source.display().to_string();
        let kind = Self::kind(source);

        let comp = shaderc::Compiler::new().map_err(fail)?;
        let mut opts = shaderc::CompileOptions::new().map_err(fail)?;
        opts.set_target_env(
            shaderc::TargetEnv::Vulkan,
            shaderc::EnvVersion::Vulkan1_0 as u32,
        );

        info!("compiling {} with shaderc", name);
        let spv = comp
            .compile_into_spirv(&text, kind, &name, "main", Some(&opts))
            .map_err(fail)?;
        let asm = comp
            .compile_into_spirv_assembly(&text, kind, &name, "main", Some(&opts))
            .map_err(fail)?;

        std::fs::write(spirv_out, spv.as_binary_u8()).map_err(|e| EmitError::io(spirv_out, e))?;
        Ok(asm.as_text().trim_end().to_string())
    }
}


#[cfg(all(test, feature = "shaderc"))]
mod shaderc_tests {
    use super::*;
    use crate::decode_words;
    use std::fs;

    #[test]
    fn kind_from_extension() {
        let kind = |p: &str| ShadercCompiler::kind(Path::new(p));
        assert!(matches!(kind("tri.vert"), shaderc::ShaderKind::Vertex));
        assert!(matches!(kind("tri.frag"), shaderc::ShaderKind::Fragment));
        assert!(matches!(kind("blur.comp"), shaderc::ShaderKind::Compute));
        assert!(matches!(kind("shader.glsl"), shaderc::ShaderKind::InferFromSource));
        assert!(matches!(kind("no_extension"), shaderc::ShaderKind::InferFromSource));
    }

    #[test]
    fn compiles_compute_shader() {
        let dir = std::env::temp_dir().join(format!("gfx-spirv-shaderc-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("fill.comp");
        fs::write(
            &source,
            "#version 450\n\
             layout(local_size_x = 64) in;\n\
             layout(set = 0, binding = 0) buffer Data { uint v[]; } data;\n\
             void main() { data.v[gl_GlobalInvocationID.x] = 1u; }\n",
        )
        .unwrap();
        let scratch = dir.join("fill.comp.tmp");

        let report = ShadercCompiler.compile(&source, &scratch).unwrap();
        assert!(report.starts_with("; SPIR-V"), "{report}");
        let words = decode_words(&fs::read(&scratch).unwrap()).unwrap();
        assert!(words.len() > 5);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn syntax_error_is_a_tool_failure() {
        let dir = std::env::temp_dir().join(format!("gfx-spirv-shaderc-bad-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("bad.frag");
        fs::write(&source, "#version 450\nvoid main() { undeclared = 1; }\n").unwrap();

        let err = ShadercCompiler
            .compile(&source, &dir.join("bad.frag.tmp"))
            .unwrap_err();
        match err {
            EmitError::ExternalToolFailure { program, output, .. } => {
                assert_eq!(program, "shaderc");
                assert!(output.contains("undeclared"));
            }
            other => panic!("{other:?}"),
        }
        fs::remove_dir_all(&dir).unwrap();
    }
}
