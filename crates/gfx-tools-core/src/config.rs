// SPDX-License-Identifier: CEPL-1.0
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CFG_FILE: &str = "gfx-tools.toml";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ToolsCfg {
    #[serde(default)]
    pub shader: ShaderCfg,
    #[serde(default)]
    pub dependencies: DepsCfg,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShaderCfg {
    #[serde(default = "default_compiler")]
    pub compiler: PathBuf,
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
    #[serde(default = "default_banner")]
    pub banner: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DepsCfg {
    #[serde(default = "default_deps_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_deps_url")]
    pub url: String,
    #[serde(default = "default_archive")]
    pub archive: PathBuf,
    #[serde(default = "default_downloader")]
    pub downloader: PathBuf,
}

impl Default for ShaderCfg {
    fn default() -> Self {
        ShaderCfg {
            compiler: default_compiler(),
            scratch_dir: default_scratch_dir(),
            banner: default_banner(),
        }
    }
}

impl Default for DepsCfg {
    fn default() -> Self {
        DepsCfg {
            dir: default_deps_dir(),
            url: default_deps_url(),
            archive: default_archive(),
            downloader: default_downloader(),
        }
    }
}

fn default_compiler() -> PathBuf {
    PathBuf::from("glslangValidator")
}
fn default_scratch_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_banner() -> Vec<String> {
    vec![
        "This file is a part of Jiayin's Graphics Samples.".to_string(),
        "Copyright(c) 2020 - 2020 by Jiayin Cao - All rights reserved.".to_string(),
    ]
}
fn default_deps_dir() -> PathBuf {
    PathBuf::from("Dependencies")
}
fn default_deps_url() -> String {
    "http://45.63.123.194/vulkan_sdk/VulkanSDK_1_2_148_0.zip".to_string()
}
fn default_archive() -> PathBuf {
    PathBuf::from("vulkan_sdk_tmp.zip")
}
fn default_downloader() -> PathBuf {
    PathBuf::from("curl")
}

/// Missing file means defaults; a broken file is logged and also falls back to defaults.
pub fn load_cfg(path: Option<&Path>) -> ToolsCfg {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CFG_FILE));
    match fs::read_to_string(path) {
        Ok(s) => match toml::from_str::<ToolsCfg>(&s) {
            Ok(cfg) => {
                debug!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("ignoring {}: {e}", path.display());
                ToolsCfg::default()
            }
        },
        Err(_) => ToolsCfg::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg: ToolsCfg = toml::from_str("").unwrap();
        assert_eq!(cfg.shader.compiler, PathBuf::from("glslangValidator"));
        assert_eq!(cfg.shader.banner.len(), 2);
        assert_eq!(cfg.dependencies.dir, PathBuf::from("Dependencies"));
        assert_eq!(cfg.dependencies.archive, PathBuf::from("vulkan_sdk_tmp.zip"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: ToolsCfg = toml::from_str(
            r#"
            [shader]
            compiler = "/opt/vulkan/bin/glslangValidator"

            [dependencies]
            dir = "third_party"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.shader.compiler,
            PathBuf::from("/opt/vulkan/bin/glslangValidator")
        );
        assert_eq!(cfg.shader.scratch_dir, PathBuf::from("."));
        assert_eq!(cfg.dependencies.dir, PathBuf::from("third_party"));
        assert_eq!(cfg.dependencies.downloader, PathBuf::from("curl"));
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        let missing = std::env::temp_dir().join("gfx-tools-core-no-such-config.toml");
        assert_eq!(load_cfg(Some(&missing)).shader.compiler, default_compiler());

        let broken = std::env::temp_dir().join(format!(
            "gfx-tools-core-broken-{}.toml",
            std::process::id()
        ));
        fs::write(&broken, "[shader\ncompiler = ").unwrap();
        let cfg = load_cfg(Some(&broken));
        fs::remove_file(&broken).unwrap();
        assert_eq!(cfg.dependencies.url, default_deps_url());
    }
}
