//! Git-backed source probe
//!
//! Shells out to the `git` CLI to compare a plugin checkout against its
//! upstream. The engine only ever sees the `SourceProbe` trait.

use std::path::PathBuf;

use async_trait::async_trait;
use comet_core::update::{ProbeOutcome, SourceProbe};
use comet_core::{CometError, CometResult};
use tokio::process::Command;
use tracing::debug;

pub struct GitCliProbe {
    plugins_dir: PathBuf,
}

impl GitCliProbe {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
        }
    }

    async fn git(&self, folder: &str, args: &[&str]) -> CometResult<String> {
        let dir = self.plugins_dir.join(folder);
        let output = Command::new("git")
            .arg("-C")
            .arg(&dir)
            .args(args)
            .output()
            .await
            .map_err(|e| CometError::Probe(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CometError::Probe(format!(
                "git {} failed in {}: {}",
                args.join(" "),
                dir.display(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl SourceProbe for GitCliProbe {
    async fn probe(&self, folder: &str) -> CometResult<ProbeOutcome> {
        self.git(folder, &["fetch", "--quiet"]).await?;
        let local = self.git(folder, &["rev-parse", "HEAD"]).await?;
        let upstream = self.git(folder, &["rev-parse", "@{u}"]).await?;

        debug!(folder = %folder, local = %local, upstream = %upstream, "Probed upstream revision");

        Ok(ProbeOutcome {
            needs_update: local != upstream,
            current_revision: Some(local),
        })
    }
}
