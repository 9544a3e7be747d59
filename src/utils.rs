use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

/// Excel's limit on sheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;

const SHEET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Checks if a path exists
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Makes `dir` absolute and creates it if needed
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    std::path::absolute(dir)
}

/// Timestamp part of a sheet name, e.g. `2024-03-01_14-05-09`
pub fn sheet_timestamp(now: NaiveDateTime) -> String {
    now.format(SHEET_TIMESTAMP_FORMAT).to_string()
}

/// Local wall-clock time used to stamp exported sheets
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Replaces characters Excel forbids in sheet names
pub fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            c => c,
        })
        .collect()
}

/// `<surgery>_<timestamp>[_<n>]`, with the surgery part shortened so the
/// whole name fits in [`MAX_SHEET_NAME_LEN`] characters.
pub fn compose_sheet_name(surgery: &str, timestamp: &str, copy: usize) -> String {
    let suffix = if copy > 1 {
        format!("_{timestamp}_{copy}")
    } else {
        format!("_{timestamp}")
    };
    let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
    let surgery: String = sanitize_sheet_name(surgery.trim())
        .trim_start_matches('\'')
        .chars()
        .take(room)
        .collect();
    format!("{surgery}{suffix}")
}

/// First sheet name not already in `existing` (compared case-insensitively,
/// as Excel does)
pub fn unique_sheet_name(surgery: &str, timestamp: &str, existing: &[String]) -> String {
    let taken = |candidate: &str| {
        existing
            .iter()
            .any(|name| name.to_lowercase() == candidate.to_lowercase())
    };
    let mut copy = 1;
    loop {
        let candidate = compose_sheet_name(surgery, timestamp, copy);
        if !taken(&candidate) {
            return candidate;
        }
        copy += 1;
    }
}
