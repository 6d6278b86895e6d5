//! Environment-driven settings, read at call time.
//!
//! - COMMANDMOCKER_TMPDIR: root under which mock directories are created (default: system temp dir).
//! - COMMANDMOCKER_SHELL: interpreter written into the shebang (default: /bin/sh).
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_TMPDIR: &str = "COMMANDMOCKER_TMPDIR";
pub const ENV_SHELL: &str = "COMMANDMOCKER_SHELL";

const DEFAULT_SHELL: &str = "/bin/sh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockerConfig {
    pub temp_root: PathBuf,
    pub shell: PathBuf,
}

impl Default for MockerConfig {
    fn default() -> Self {
        Self {
            temp_root: env::temp_dir(),
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

/// Non-empty, trimmed value of an environment variable.
fn env_nonempty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl MockerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_nonempty)
    }

    /// Deterministic constructor for tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(root) = lookup(ENV_TMPDIR).filter(|s| !s.is_empty()) {
            cfg.temp_root = PathBuf::from(root);
        }
        if let Some(shell) = lookup(ENV_SHELL).filter(|s| !s.is_empty()) {
            cfg.shell = PathBuf::from(shell);
        }
        cfg
    }

    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    /// The temp root as mock directories are created under it: absolute and lexically normalised.
    ///
    /// Create, remove and sweep all go through this, so a handle and its `PATH` entry are the same
    /// bytes whatever form `temp_root` was configured in (relative, `/./`, doubled slashes).
    pub fn resolved_temp_root(&self) -> PathBuf {
        normalize(&absolute(&self.temp_root))
    }
}

pub(crate) fn absolute(p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(p)
    }
}

/// Lexically normalised form: drops `.` components, doubled and trailing slashes.
pub(crate) fn normalize(p: &Path) -> PathBuf {
    p.components().collect()
}
