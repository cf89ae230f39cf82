// SPDX-License-Identifier: CEPL-1.0
//! Fetches the prebuilt SDK archive into the dependencies folder.
#![deny(unsafe_op_in_unsafe_fn)]
use gfx_tools_core::{CommandRunner, DepsCfg, ProcessRunner};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{program} exited with status {status:?}")]
    ExternalToolFailure {
        program: String,
        status: Option<i32>,
        output: String,
    },
    #[error("{}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> FetchError + '_ {
    move |source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn zip_err(path: &Path) -> impl FnOnce(zip::result::ZipError) -> FetchError + '_ {
    move |source| FetchError::Archive {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub dir: PathBuf,
    pub url: String,
    pub archive: PathBuf,
    /// Purge and re-download even when `dir` exists.
    pub force: bool,
}

impl FetchConfig {
    pub fn from_cfg(cfg: &DepsCfg, force: bool) -> Self {
        FetchConfig {
            dir: cfg.dir.clone(),
            url: cfg.url.clone(),
            archive: cfg.archive.clone(),
            force,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Synced,
    AlreadyPresent,
}

pub trait ArchiveFetcher {
    fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
    fn unpack(&self, archive: &Path, into: &Path) -> Result<(), FetchError>;
}

/// Extracts every entry of a zip archive below `into`, creating it if needed.
pub fn unpack_zip(archive: &Path, into: &Path) -> Result<(), FetchError> {
    fs::create_dir_all(into).map_err(io_err(into))?;
    let file = fs::File::open(archive).map_err(io_err(archive))?;
    let mut zip = zip::ZipArchive::new(file).map_err(zip_err(archive))?;
    info!("unpacking {} entries into {}", zip.len(), into.display());
    zip.extract(into).map_err(zip_err(archive))
}

/// Downloads through an external tool (`curl` by default) and unpacks in process.
pub struct CommandFetcher<R: CommandRunner = ProcessRunner> {
    downloader: PathBuf,
    runner: R,
}

impl CommandFetcher<ProcessRunner> {
    pub fn from_cfg(cfg: &DepsCfg) -> Self {
        Self::with_runner(&cfg.downloader, ProcessRunner)
    }
}

impl<R: CommandRunner> CommandFetcher<R> {
    pub fn with_runner(downloader: impl Into<PathBuf>, runner: R) -> Self {
        CommandFetcher {
            downloader: downloader.into(),
            runner,
        }
    }
}

impl<R: CommandRunner> ArchiveFetcher for CommandFetcher<R> {
    fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let args: Vec<OsString> = vec![
            "-L".into(),
            "-f".into(),
            "-o".into(),
            dest.as_os_str().to_owned(),
            url.into(),
        ];
        let out = self
            .runner
            .run(&self.downloader, &args)
            .map_err(io_err(&self.downloader))?;
        if out.success {
            Ok(())
        } else {
            Err(FetchError::ExternalToolFailure {
                program: self.downloader.display().to_string(),
                status: out.status,
                output: out.combined(),
            })
        }
    }

    fn unpack(&self, archive: &Path, into: &Path) -> Result<(), FetchError> {
        unpack_zip(archive, into)
    }
}

fn sync(cfg: &FetchConfig, fetcher: &dyn ArchiveFetcher) -> Result<(), FetchError> {
    info!("downloading {}", cfg.url);
    fetcher.download(&cfg.url, &cfg.archive)?;
    fetcher.unpack(&cfg.archive, &cfg.dir)?;
    fs::remove_file(&cfg.archive).map_err(io_err(&cfg.archive))
}

/// Syncs when forced or when the folder is missing. Only the folder's
/// existence is checked, not its contents, so a failed sync removes it again.
pub fn ensure_dependencies(cfg: &FetchConfig, fetcher: &dyn ArchiveFetcher) -> Result<FetchOutcome, FetchError> {
    if cfg.force {
        info!("force syncing dependencies");
        if cfg.dir.is_dir() {
            warn!("purging {}", cfg.dir.display());
            fs::remove_dir_all(&cfg.dir).map_err(io_err(&cfg.dir))?;
        }
        fs::create_dir_all(&cfg.dir).map_err(io_err(&cfg.dir))?;
    } else if cfg.dir.is_dir() {
        info!("{} already present", cfg.dir.display());
        return Ok(FetchOutcome::AlreadyPresent);
    }

    if let Err(e) = sync(cfg, fetcher) {
        let _ = fs::remove_dir_all(&cfg.dir);
        let _ = fs::remove_file(&cfg.archive);
        return Err(e);
    }
    info!("dependencies synced into {}", cfg.dir.display());
    Ok(FetchOutcome::Synced)
}
