//! Error kinds surfaced by the mock registry.
//!
//! Every variant is returned to the caller; nothing here terminates the process.
//! Message texts are stable (tests match on them).
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("failed to create mock directory under {}: {source}", root.display())]
    DirectoryCreationFailed {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write fake executable {}: {source}", path.display())]
    ExecutableWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid command name {name:?}: must be a single non-empty path component")]
    InvalidCommandName { name: String },

    #[error("Remove can only remove temporary directories, tried to remove {}", handle.display())]
    InvalidHandle { handle: PathBuf },

    #[error("{} is not in $PATH", handle.display())]
    HandleNotInSearchPath { handle: PathBuf },

    #[error("failed to scan temp root {} for mock directories: {source}", root.display())]
    TempRootScanFailed {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove mock directory {}: {source}", handle.display())]
    DirectoryRemovalFailed {
        handle: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MockError {
    /// True when the search path was already restored despite the error.
    ///
    /// Only a failed directory removal happens after the `PATH` edit.
    pub fn search_path_restored(&self) -> bool {
        matches!(self, MockError::DirectoryRemovalFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_path_message_is_stable() {
        let e = MockError::HandleNotInSearchPath {
            handle: PathBuf::from("/tmp/blabla"),
        };
        assert_eq!(e.to_string(), "/tmp/blabla is not in $PATH");
        assert!(!e.search_path_restored());
    }

    #[test]
    fn test_invalid_handle_message_names_path() {
        let e = MockError::InvalidHandle {
            handle: PathBuf::from("/some/usr/bin"),
        };
        assert_eq!(
            e.to_string(),
            "Remove can only remove temporary directories, tried to remove /some/usr/bin"
        );
    }

    #[test]
    fn test_removal_failure_keeps_source() {
        use std::error::Error as _;
        let e = MockError::DirectoryRemovalFailed {
            handle: PathBuf::from("/tmp/commandmocker-x"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.search_path_restored());
        assert!(e.source().is_some());
    }
}
