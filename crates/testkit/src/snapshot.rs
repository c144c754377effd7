//! Golden event logs.
//!
//! A recorded event sequence is rendered the same way the `--event-log`
//! option writes it: one compact JSON object per line, in dispatch order.
//! Goldens live in a crate's `tests/snapshots/` directory as `<name>.jsonl`;
//! rerun with `IRIS_UPDATE_SNAPSHOTS=1` to rewrite them.

use crate::recorder::RecordedEvent;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that enables golden updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "IRIS_UPDATE_SNAPSHOTS";

/// Location of the golden `name` for the crate at `manifest_dir`.
pub fn snapshot_path(manifest_dir: &str, name: &str) -> PathBuf {
    Path::new(manifest_dir)
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.jsonl"))
}

/// Assert that `events` match the golden `name` of the crate at
/// `manifest_dir` (pass `env!("CARGO_MANIFEST_DIR")`).
///
/// On mismatch the error names the first differing event and includes the
/// full actual log.
pub fn assert_events_snapshot(
    manifest_dir: &str,
    name: &str,
    events: &[RecordedEvent],
) -> Result<()> {
    let path = snapshot_path(manifest_dir, name);
    let actual = render_events(events)?;

    if update_requested() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        return fs::write(&path, &actual)
            .with_context(|| format!("failed to write event golden {}", path.display()));
    }

    let expected = fs::read_to_string(&path).with_context(|| {
        format!(
            "event golden missing at {} (set {UPDATE_SNAPSHOTS_ENV}=1 to create it)",
            path.display()
        )
    })?;

    match first_difference(&expected, &actual) {
        None => Ok(()),
        Some((index, want, got)) => anyhow::bail!(
            "event {index} differs from {}\n  expected: {}\n  actual:   {}\n--- actual log ---\n{actual}",
            path.display(),
            want.unwrap_or("<end of log>"),
            got.unwrap_or("<end of log>"),
        ),
    }
}

/// One JSON line per event.
pub fn render_events(events: &[RecordedEvent]) -> Result<String> {
    let mut out = String::new();
    for event in events {
        out.push_str(&serde_json::to_string(event).context("failed to encode recorded event")?);
        out.push('\n');
    }
    Ok(out)
}

fn update_requested() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV).is_ok_and(|value| matches!(value.as_str(), "1" | "true"))
}

// Lines are compared after trimming, so CRLF checkouts still match.
fn first_difference<'a>(
    expected: &'a str,
    actual: &'a str,
) -> Option<(usize, Option<&'a str>, Option<&'a str>)> {
    let mut want = expected.lines().map(str::trim_end).filter(|l| !l.is_empty());
    let mut got = actual.lines();
    let mut index = 0;
    loop {
        match (want.next(), got.next()) {
            (None, None) => return None,
            (w, g) if w != g => return Some((index, w, g)),
            _ => index += 1,
        }
    }
}
