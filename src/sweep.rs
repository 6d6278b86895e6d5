//! Cleanup of orphaned mock directories (e.g. left behind by a test process that crashed before
//! calling remove).
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, instrument};

use crate::config::MockerConfig;
use crate::errors::MockError;
use crate::mocker::MOCK_DIR_PREFIX;
use crate::search_path;

/// Delete registry-owned directories under the temp root that are at least `min_age` old and not
/// on the current search path. Returns how many were deleted.
pub fn sweep_orphans(min_age: Duration) -> Result<usize, MockError> {
    sweep_orphans_in(&MockerConfig::from_env(), min_age)
}

#[instrument(level = "debug", err, skip(config), fields(root = %config.temp_root().display()))]
pub fn sweep_orphans_in(config: &MockerConfig, min_age: Duration) -> Result<usize, MockError> {
    // Candidates must be spelled exactly like the PATH entries create wrote.
    let root = config.resolved_temp_root();
    let entries = match fs::read_dir(&root) {
        Ok(it) => it,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => return Err(MockError::TempRootScanFailed { root, source }),
    };

    let prefix = format!("{MOCK_DIR_PREFIX}-");
    let now = SystemTime::now();
    let mut removed = 0usize;
    for ent in entries.flatten() {
        let owned = ent
            .file_name()
            .to_str()
            .map(|n| n.starts_with(&prefix))
            .unwrap_or(false);
        let is_dir = ent.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !owned || !is_dir {
            continue;
        }
        if age_of(&ent.path(), now) < min_age {
            continue;
        }

        let path = root.join(ent.file_name());
        // Create renames a directory to its owned name and puts it on PATH in one critical
        // section, so under the lock an owned directory that is not on PATH is never in flight.
        let guard = search_path::lock();
        if guard.contains(&path) {
            continue;
        }
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                debug!(dir = %path.display(), "removed orphaned mock directory");
                removed += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(MockError::DirectoryRemovalFailed {
                    handle: path,
                    source,
                })
            }
        }
        drop(guard);
    }
    Ok(removed)
}

fn age_of(p: &Path, now: SystemTime) -> Duration {
    fs::metadata(p)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| now.duration_since(t).ok())
        .unwrap_or_default()
}
