//! Mock registry operations: create, create_failing, remove and invocation inspection.
//!
//! Invariants:
//! - A handle is the mock directory path; it is both the filesystem resource and the `PATH` entry.
//! - `PATH` is only edited under `search_path::lock()`; filesystem work happens outside the lock on
//!   uniquely named directories, except the final rename in create.
//! - A `commandmocker-*` directory only appears (by rename from a staging name) while the lock is
//!   held and in the same critical section that puts it on `PATH`.
//! - Create never touches `PATH` unless the directory and executable were fully written; on any
//!   earlier failure the staging directory is deleted again.
//! - Handles and `PATH` entries are built from the resolved (absolute, normalised) temp root.
//! - Remove restores `PATH` before deleting the directory, so a removal error never means the
//!   entry is still on the search path.
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};

use crate::config::{normalize, MockerConfig};
use crate::errors::MockError;
use crate::script::{self, ScriptSpec, ARGS_FILE, OUTPUT_FILE, RAN_MARKER};
use crate::search_path;
use crate::util::id::create_mock_token;

/// Name prefix of every registry-owned directory under the temp root.
pub const MOCK_DIR_PREFIX: &str = "commandmocker";

/// Hidden prefix (after a leading `.`) of directories still being written by create.
const STAGING_PREFIX: &str = "commandmocker-staging";

/// Shadow `name` with an executable that prints `output` to stdout and exits 0.
///
/// Returns the handle to pass to the other operations.
pub fn create(name: &str, output: &str) -> Result<PathBuf, MockError> {
    create_with(&MockerConfig::from_env(), name, &ScriptSpec::success(output))
}

/// Shadow `name` with an executable that prints `output` to stderr and exits with `exit_code`.
///
/// The code is written as-is; a zero code is not rejected.
pub fn create_failing(name: &str, output: &str, exit_code: u8) -> Result<PathBuf, MockError> {
    create_with(
        &MockerConfig::from_env(),
        name,
        &ScriptSpec::failing(output, exit_code),
    )
}

#[instrument(level = "debug", err, skip(config, spec), fields(exit_code = spec.exit_code))]
pub fn create_with(
    config: &MockerConfig,
    name: &str,
    spec: &ScriptSpec<'_>,
) -> Result<PathBuf, MockError> {
    validate_command_name(name)?;
    let root = config.resolved_temp_root();
    let creation_failed = |source| MockError::DirectoryCreationFailed {
        root: root.clone(),
        source,
    };
    fs::create_dir_all(&root).map_err(creation_failed)?;

    // Built under a staging name that sweep does not own; only renamed to its final
    // `commandmocker-*` name while holding the search path lock, right before it is published.
    let dir = root.join(format!("{MOCK_DIR_PREFIX}-{}", create_mock_token()));
    let staging = tempfile::Builder::new()
        .prefix(&format!(".{STAGING_PREFIX}-"))
        .tempdir_in(&root)
        .map_err(creation_failed)?;

    // Dropping `staging` on any error path deletes the half-built directory.
    write_executable(staging.path(), &dir, name, config, spec)?;

    {
        let mut path = search_path::lock();
        if dir.exists() {
            return Err(creation_failed(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", dir.display()),
            )));
        }
        fs::rename(staging.path(), &dir).map_err(creation_failed)?;
        let _ = staging.keep();
        let current = path.get();
        path.set(&search_path::prepend_entry(&current, &dir));
    }
    debug!(handle = %dir.display(), "mock registered on PATH");
    Ok(dir)
}

/// Write the executable into `staging`; the script refers to `final_dir`, where it will run.
fn write_executable(
    staging: &Path,
    final_dir: &Path,
    name: &str,
    config: &MockerConfig,
    spec: &ScriptSpec<'_>,
) -> Result<(), MockError> {
    let exe = staging.join(name);
    let write = || -> io::Result<()> {
        let body = script::render(final_dir, &config.shell, spec)?;
        fs::write(&exe, body)?;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755))
    };
    write().map_err(|source| MockError::ExecutableWriteFailed {
        path: final_dir.join(name),
        source,
    })
}

fn validate_command_name(name: &str) -> Result<(), MockError> {
    let ok = !name.is_empty()
        && name != "."
        && name != ".."
        && ![RAN_MARKER, OUTPUT_FILE, ARGS_FILE].contains(&name)
        && !name.contains('/')
        && !name.contains('\0');
    if ok {
        Ok(())
    } else {
        Err(MockError::InvalidCommandName {
            name: name.to_string(),
        })
    }
}

/// A removable handle is absolute, free of `..`, and strictly below the temp root.
/// `root` must already be resolved (see `MockerConfig::resolved_temp_root`).
fn validate_handle(handle: &Path, root: &Path) -> Result<PathBuf, MockError> {
    let invalid = || MockError::InvalidHandle {
        handle: handle.to_path_buf(),
    };
    if !handle.is_absolute() || handle.components().any(|c| c == Component::ParentDir) {
        return Err(invalid());
    }
    let handle = normalize(handle);
    if handle == root || !handle.starts_with(root) {
        return Err(invalid());
    }
    Ok(handle)
}

/// Take the mock off `PATH` (wherever it sits) and delete its directory.
pub fn remove(handle: impl AsRef<Path>) -> Result<(), MockError> {
    remove_with(&MockerConfig::from_env(), handle.as_ref())
}

#[instrument(level = "debug", err, skip(config, handle), fields(handle = %handle.display()))]
pub fn remove_with(config: &MockerConfig, handle: &Path) -> Result<(), MockError> {
    let dir = validate_handle(handle, &config.resolved_temp_root())?;

    {
        let mut path = search_path::lock();
        let current = path.get();
        let next = search_path::excise_entry(&current, &dir).ok_or_else(|| {
            MockError::HandleNotInSearchPath {
                handle: handle.to_path_buf(),
            }
        })?;
        path.set(&next);
    }
    debug!(handle = %dir.display(), "mock removed from PATH");

    match fs::remove_dir_all(&dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(MockError::DirectoryRemovalFailed {
            handle: handle.to_path_buf(),
            source,
        }),
    }
}

/// Whether the fake executable has run at least once.
pub fn was_invoked(handle: impl AsRef<Path>) -> bool {
    handle.as_ref().join(RAN_MARKER).is_file()
}

/// Everything the fake executable emitted, across all invocations, in order.
pub fn captured_output(handle: impl AsRef<Path>) -> String {
    fs::read(handle.as_ref().join(OUTPUT_FILE))
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default()
}

/// Argument vectors of every invocation, in order.
pub fn invocations(handle: impl AsRef<Path>) -> Vec<Vec<String>> {
    fs::read(handle.as_ref().join(ARGS_FILE))
        .map(|b| script::parse_invocations(&b))
        .unwrap_or_default()
}
