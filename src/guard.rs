use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::MockError;
use crate::mocker;

/// A registered mock that removes itself when dropped.
///
/// Prefer calling [`MockCommand::remove`] explicitly when the test wants to assert that cleanup
/// succeeded; drop-time removal only logs failures.
#[derive(Debug)]
pub struct MockCommand {
    dir: PathBuf,
    removed: bool,
}

impl MockCommand {
    pub fn new(name: &str, output: &str) -> Result<Self, MockError> {
        mocker::create(name, output).map(Self::from_handle)
    }

    pub fn failing(name: &str, output: &str, exit_code: u8) -> Result<Self, MockError> {
        mocker::create_failing(name, output, exit_code).map(Self::from_handle)
    }

    fn from_handle(dir: PathBuf) -> Self {
        Self { dir, removed: false }
    }

    /// The underlying handle (mock directory).
    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn was_invoked(&self) -> bool {
        mocker::was_invoked(&self.dir)
    }

    pub fn captured_output(&self) -> String {
        mocker::captured_output(&self.dir)
    }

    pub fn invocations(&self) -> Vec<Vec<String>> {
        mocker::invocations(&self.dir)
    }

    pub fn remove(mut self) -> Result<(), MockError> {
        self.removed = true;
        mocker::remove(&self.dir)
    }
}

impl Drop for MockCommand {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = mocker::remove(&self.dir) {
            warn!(handle = %self.dir.display(), error = %e, "mock cleanup on drop failed");
        }
    }
}
