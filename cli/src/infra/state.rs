//! Infrastructure implementation of the `MachineStateStore` port.
//!
//! `StateManager` keeps one JSON file per machine and provides async
//! load/save/remove using `tokio::task::spawn_blocking`, with atomic write
//! (temp file + rename) to prevent state corruption.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::MachineStateStore;
use crate::domain::{MachineState, validate_machine_name};

/// Environment variable that overrides the state directory.
pub const STATE_DIR_ENV: &str = "VRA7_STATE_DIR";

/// State directory manager: implements `MachineStateStore` for the infra layer.
#[derive(Debug, Clone)]
pub struct StateManager {
    dir: PathBuf,
}

impl StateManager {
    /// Create a state manager using `$VRA7_STATE_DIR`, falling back to
    /// `~/.vra7/state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var(STATE_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(Self::with_dir(PathBuf::from(dir)));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_dir(home.join(".vra7").join("state")))
    }

    /// Create a state manager with an explicit directory (used in tests).
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the state file for machine `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid machine name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_machine_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }

    fn load_sync(&self, name: &str) -> Result<Option<MachineState>> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading state file {}", path.display()))?;
        let state: MachineState = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", path.display()))?;
        anyhow::ensure!(
            state.name == name,
            "state file {} belongs to machine '{}'",
            path.display(),
            state.name
        );
        Ok(Some(state))
    }

    fn save_sync(&self, state: &MachineState) -> Result<()> {
        let path = self.path_for(&state.name)?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating directory {}", self.dir.display()))?;
        let content = serde_json::to_string_pretty(state).context("serializing state")?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("finalizing state file {}", path.display()))?;
        Ok(())
    }

    fn remove_sync(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("removing state file {}", path.display()))?;
        }
        Ok(())
    }
}

impl MachineStateStore for StateManager {
    async fn load_async(&self, name: &str) -> Result<Option<MachineState>> {
        let mgr = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || mgr.load_sync(&name))
            .await
            .context("state load task panicked")?
    }

    async fn save_async(&self, state: &MachineState) -> Result<()> {
        let mgr = self.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || mgr.save_sync(&state))
            .await
            .context("state save task panicked")?
    }

    async fn remove_async(&self, name: &str) -> Result<()> {
        let mgr = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || mgr.remove_sync(&name))
            .await
            .context("state remove task panicked")?
    }
}
