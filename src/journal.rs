use {
    crate::source::{CommandError, CommandRunner},
    std::time::Duration,
};

/// joins throttle lines into a single log field.
pub const SEPARATOR: &str = " :::: ";

/// returns journal entries from the lookback window that contain `marker`.
///
/// an empty result is the normal case.
pub fn throttle_events(
    runner: &impl CommandRunner,
    lookback: Duration,
    marker: &str,
) -> Result<Vec<String>, CommandError> {
    let since = format!("-{}s", lookback.as_secs());
    let output = runner.run("journalctl", &["--since", &since])?;

    let events = filter(&output, marker);
    tracing::debug!(count = events.len(), "scanned journal for throttle events");

    Ok(events)
}

fn filter(journal: &str, marker: &str) -> Vec<String> {
    journal
        .split('\n')
        .filter(|line| !line.is_empty())
        .filter(|line| line.contains(marker))
        .map(str::to_owned)
        .collect()
}
