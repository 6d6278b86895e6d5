//! commandmocker: replace an external command with a scripted fake for the duration of a test.
//!
//! ```no_run
//! use std::process::Command;
//!
//! let dir = commandmocker::create("ssh", "ssh: Could not resolve hostname myhost").unwrap();
//! let out = Command::new("ssh").arg("myhost").output().unwrap();
//! assert_eq!(out.stdout, b"ssh: Could not resolve hostname myhost");
//! assert!(commandmocker::was_invoked(&dir));
//! commandmocker::remove(&dir).unwrap();
//! ```
//!
//! Module map
//! - mocker: create/create_failing/remove plus invocation inspection; handles are directory paths.
//! - search_path: the single process-wide lock and get/set accessors for `PATH`.
//! - script: fake executable body and the `.args` record format.
//! - guard: `MockCommand`, removes its mock on drop.
//! - sweep: deletes orphaned `commandmocker-*` directories.
//! - config: COMMANDMOCKER_TMPDIR / COMMANDMOCKER_SHELL.
//!
//! Intended for tests only; it is not a sandbox and trusts its caller. Unix only.

#[cfg(not(unix))]
compile_error!("commandmocker relies on POSIX shell scripts and executable bits; Unix only");

pub mod config;
pub mod errors;
pub mod guard;
pub mod mocker;
pub mod script;
pub mod search_path;
pub mod sweep;
pub mod util;

pub use config::MockerConfig;
pub use errors::MockError;
pub use guard::MockCommand;
pub use mocker::{
    captured_output, create, create_failing, create_with, invocations, remove, remove_with,
    was_invoked, MOCK_DIR_PREFIX,
};
pub use script::{OutputStream, ScriptSpec};
pub use sweep::{sweep_orphans, sweep_orphans_in};
