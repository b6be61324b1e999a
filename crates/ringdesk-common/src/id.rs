//! Window identifier generation.

use chrono::Utc;

/// Build a timestamp-based window id (milliseconds since the epoch).
///
/// `taken` is consulted so that two windows created within the same
/// millisecond still get distinct ids: the second becomes `"<ms>-1"`, etc.
pub fn new_window_id(taken: impl Fn(&str) -> bool) -> String {
    window_id_at(Utc::now().timestamp_millis(), taken)
}

pub fn window_id_at(millis: i64, taken: impl Fn(&str) -> bool) -> String {
    let base = millis.to_string();
    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
