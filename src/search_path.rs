//! Process-wide search path (`PATH`) state.
//!
//! Invariants:
//! - All read-modify-write cycles on `PATH` happen while holding the guard returned by [`lock`].
//! - `PATH` is edited as raw bytes; entries are never normalised, so unrelated entries (including
//!   empty ones and non-UTF-8 ones) keep their exact bytes and order.
use once_cell::sync::Lazy;
use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub const PATH_VAR: &str = "PATH";
const SEPARATOR: u8 = b':';

static PATH_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Exclusive access to the process search path; the lock is released on drop.
pub struct SearchPath {
    _guard: MutexGuard<'static, ()>,
}

/// Acquire the process-wide search path lock (blocks until available).
///
/// Not reentrant: do not call registry operations while holding the returned guard.
pub fn lock() -> SearchPath {
    // The guarded state is (), so a panic elsewhere cannot leave it inconsistent.
    let guard = PATH_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    SearchPath { _guard: guard }
}

impl SearchPath {
    /// Current value; unset reads as empty.
    pub fn get(&self) -> OsString {
        env::var_os(PATH_VAR).unwrap_or_default()
    }

    /// Write back a value; an empty value unsets the variable.
    pub fn set(&mut self, value: &OsStr) {
        if value.is_empty() {
            env::remove_var(PATH_VAR);
        } else {
            env::set_var(PATH_VAR, value);
        }
    }

    pub fn contains(&self, dir: &Path) -> bool {
        entries(&self.get()).any(|e| e == dir.as_os_str())
    }
}

/// Split a search path into its entries; an empty value has none.
pub fn entries(path: &OsStr) -> impl Iterator<Item = &OsStr> {
    let bytes = path.as_bytes();
    let skip_all = bytes.is_empty();
    bytes
        .split(|b| *b == SEPARATOR)
        .filter(move |_| !skip_all)
        .map(OsStr::from_bytes)
}

/// Return `path` with `dir` inserted as the first entry.
///
/// An empty `path` yields `dir` alone (a trailing separator would add the working directory).
pub fn prepend_entry(path: &OsStr, dir: &Path) -> OsString {
    let mut out = dir.as_os_str().as_bytes().to_vec();
    if !path.is_empty() {
        out.push(SEPARATOR);
        out.extend_from_slice(path.as_bytes());
    }
    OsString::from_vec(out)
}

/// Return `path` with the first entry equal to `dir` removed, or None when absent.
pub fn excise_entry(path: &OsStr, dir: &Path) -> Option<OsString> {
    let target = dir.as_os_str();
    let mut kept: Vec<&[u8]> = entries(path).map(|e| e.as_bytes()).collect();
    let idx = kept.iter().position(|e| *e == target.as_bytes())?;
    kept.remove(idx);
    Some(OsString::from_vec(kept.join(&SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(s: &str) -> OsString {
        OsString::from(s)
    }

    #[test]
    fn test_prepend_onto_existing_and_empty() {
        let dir = Path::new("/tmp/commandmocker-a");
        assert_eq!(
            prepend_entry(&os("/usr/bin:/bin"), dir),
            os("/tmp/commandmocker-a:/usr/bin:/bin")
        );
        assert_eq!(prepend_entry(&os(""), dir), os("/tmp/commandmocker-a"));
    }

    #[test]
    fn test_excise_front_middle_end() {
        let dir = Path::new("/tmp/m");
        assert_eq!(excise_entry(&os("/tmp/m:/a:/b"), dir), Some(os("/a:/b")));
        assert_eq!(excise_entry(&os("/a:/tmp/m:/b"), dir), Some(os("/a:/b")));
        assert_eq!(excise_entry(&os("/a:/b:/tmp/m"), dir), Some(os("/a:/b")));
        assert_eq!(excise_entry(&os("/tmp/m"), dir), Some(os("")));
    }

    #[test]
    fn test_excise_absent_or_prefix_only() {
        let dir = Path::new("/tmp/m");
        assert_eq!(excise_entry(&os("/a:/b"), dir), None);
        assert_eq!(excise_entry(&os("/tmp/m2:/a"), dir), None);
        assert_eq!(excise_entry(&os(""), dir), None);
    }

    #[test]
    fn test_excise_removes_exactly_one_duplicate() {
        let dir = Path::new("/tmp/m");
        assert_eq!(
            excise_entry(&os("/a:/tmp/m:/b:/tmp/m"), dir),
            Some(os("/a:/b:/tmp/m"))
        );
    }

    #[test]
    fn test_excise_preserves_empty_entries() {
        let dir = Path::new("/tmp/m");
        assert_eq!(excise_entry(&os("/tmp/m::/a"), dir), Some(os(":/a")));
        assert_eq!(excise_entry(&os("/a::/tmp/m"), dir), Some(os("/a:")));
        assert_eq!(excise_entry(&os(":/tmp/m:/a"), dir), Some(os(":/a")));
    }

    #[test]
    fn test_excise_keeps_non_utf8_entries() {
        let dir = Path::new("/tmp/m");
        let raw = OsString::from_vec(b"/tmp/m:/opt/\xffbin".to_vec());
        let out = excise_entry(&raw, dir).expect("present");
        assert_eq!(out.as_bytes(), b"/opt/\xffbin");
    }

    #[test]
    fn test_entries_of_empty_is_empty() {
        assert_eq!(entries(&os("")).count(), 0);
        assert_eq!(entries(&os("/a::/b")).count(), 3);
    }
}
