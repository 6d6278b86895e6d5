use once_cell::sync::Lazy;
use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use commandmocker::search_path;

static PATH_TEST_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per binary (RUST_LOG controls verbosity).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Serialise tests in this binary that edit PATH or spawn mocked commands.
pub fn serial() -> MutexGuard<'static, ()> {
    init_tracing();
    PATH_TEST_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[allow(dead_code)]
pub fn current_path() -> OsString {
    search_path::lock().get()
}

#[allow(dead_code)]
pub fn path_entries() -> Vec<OsString> {
    let raw = current_path();
    search_path::entries(&raw).map(|e| e.to_os_string()).collect()
}

#[allow(dead_code)]
pub fn first_path_entry() -> Option<OsString> {
    path_entries().into_iter().next()
}

#[allow(dead_code)]
pub fn count_entry(dir: &Path) -> usize {
    path_entries()
        .iter()
        .filter(|e| e.as_os_str() == dir.as_os_str())
        .count()
}
