//! JSON persistence of the logged-in session.
//!
//! A session lives from login to logout. Between CLI invocations it is kept
//! in `session.json`; logout writes an empty state.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::Result;
use crate::gamification::{DayProgress, Notification};
use crate::plan::WorkoutPlan;
use crate::profile::UserProfile;

const SESSION_FILE: &str = "session.json";

/// Everything the app keeps for the current user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub plan: Option<WorkoutPlan>,
    /// Exercises ticked this session.
    #[serde(default)]
    pub progress: DayProgress,
    /// Banner waiting to be shown or to expire.
    #[serde(default)]
    pub notification: Option<Notification>,
}

/// Location of the session file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// `session.json` in the data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(data_dir()?.join(SESSION_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session; a missing file is an empty session.
    pub fn load(&self) -> Result<SessionState> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionState::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file so a crash never leaves half a session.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "session saved");
        Ok(())
    }
}
