use std::sync::LazyLock;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{Level, LevelFilter, info};

/// Process start, the clock shown in every log line
pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// `[LEVEL] [hh:mm:ss] <thread>` with the time elapsed since [`EPOCH`]
pub fn log_prefix(level: Level, elapsed: Duration, thread_name: &str) -> String {
    let sec = elapsed.as_secs() % 60;
    let min = (elapsed.as_secs() / 60) % 60;
    let hours = (elapsed.as_secs() / 60) / 60;

    format!("[{level}] [{hours:0>2}:{min:0>2}:{sec:0>2}] <{thread_name}>")
}

/// Logger shared by the binaries of the workspace, writing to stdout
pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");
            let prefix = log_prefix(record.level(), EPOCH.elapsed(), thread_name);

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        // Add blanket level filter -
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("[MAIN] time: {}", jiff::Timestamp::now());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Level::Info, 3723, "main", "[INFO] [01:02:03] <main>")]
    #[test_case(Level::Warn, 59, "worker-3", "[WARN] [00:00:59] <worker-3>")]
    #[test_case(Level::Debug, 360_000, "-", "[DEBUG] [100:00:00] <->")]
    fn formats_prefix(level: Level, secs: u64, thread: &str, expected: &str) {
        assert_eq!(log_prefix(level, Duration::from_secs(secs), thread), expected);
    }
}
