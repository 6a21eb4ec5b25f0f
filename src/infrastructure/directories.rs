use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::env::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = PathBuf::from(&cfg.logs_dir);
    if !logs_dir.exists() {
        fs::create_dir_all(&logs_dir)
            .with_context(|| format!("failed to create directory {}", cfg.logs_dir))?;
    }

    let probe_file = logs_dir.join(".write-test");
    fs::write(&probe_file, b"ok")?;
    fs::remove_file(&probe_file)?;

    Ok(ResolvedPaths {
        logs_dir: logs_dir.canonicalize().unwrap_or(logs_dir),
    })
}
