use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

static SEQ: AtomicU64 = AtomicU64::new(0);

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn base36(mut v: u64) -> String {
    if v == 0 {
        return "0".to_string();
    }
    let mut s = Vec::new();
    while v > 0 {
        s.push(ALPHABET[(v % 36) as usize]);
        v /= 36;
    }
    s.reverse();
    String::from_utf8_lossy(&s).into_owned()
}

/// Uniqueness token for a mock directory name: `<pid>-<nanos>-<seq>` in base36.
///
/// pid plus sequence is unique among live processes; the timestamp separates reused pids.
pub fn create_mock_token() -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0));
    let nanos = (now.as_nanos() & 0xff_ffff_ffff) as u64;
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}-{}-{}",
        base36(u64::from(std::process::id())),
        base36(nanos),
        base36(seq)
    )
}
