//! Stopwatch persisted as an append-only list of labelled timestamps
//!
//! Each stopwatch is a text file with one `<label>: <nanoseconds>` line per
//! entry. The first line, labelled `0`, is the start time. Files are keyed by
//! the parent process identifier, so every command run from one shell shares a
//! stopwatch while other shells get their own.

use crate::config::Config;
use crate::process::{get_parent_process_id, ProcessId, INVALID_PROCESS_ID};
use crate::{CoreError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Label written for the start entry
pub const START_LABEL: &str = "0";

const SEPARATOR: &str = ": ";

const NANOS_PER_SEC: f64 = 1e9;

/// File name used when the parent process cannot be determined
pub const UNKNOWN_PARENT_KEY: &str = "-1";

/// Nanoseconds since the UNIX epoch
///
/// Clocks set before 1970 read as zero.
pub fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// A raw line of the stopwatch file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTime {
    pub label: String,
    pub nanoseconds: u64,
}

impl StoredTime {
    fn parse(line: &str) -> Result<Self> {
        let (label, nanos) = line
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| CoreError::CorruptStore(format!("missing separator in {:?}", line)))?;
        let nanoseconds = nanos
            .trim()
            .parse::<u64>()
            .map_err(|e| CoreError::CorruptStore(format!("bad timestamp in {:?}: {}", line, e)))?;
        Ok(Self {
            label: label.to_string(),
            nanoseconds,
        })
    }
}

/// A recorded time in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct Time {
    pub label: String,
    /// Seconds since the previous entry
    pub lap: f64,
    /// Seconds since the start
    pub split: f64,
}

fn seconds_between(from: u64, to: u64) -> f64 {
    to.saturating_sub(from) as f64 / NANOS_PER_SEC
}

/// A stopwatch stored at a single file path
#[derive(Debug, Clone)]
pub struct Stopwatch {
    path: PathBuf,
}

impl Stopwatch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stopwatch for a given parent process inside the data directory
    ///
    /// The sentinel parent maps to a file named `-1`.
    pub fn for_process(config: &Config, ppid: ProcessId) -> Self {
        let key = match ppid {
            INVALID_PROCESS_ID => UNKNOWN_PARENT_KEY.to_string(),
            pid => pid.to_string(),
        };
        Self::new(config.data_dir.join(key))
    }

    /// The stopwatch belonging to the caller's parent process
    ///
    /// An unresolvable parent maps to the `-1` file, which is shared by every
    /// caller whose parent is unknown.
    pub fn for_parent(config: &Config) -> Self {
        Self::for_process(config, get_parent_process_id())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_running(&self) -> bool {
        self.path.is_file()
    }

    /// Start the stopwatch at `now`
    pub fn start(&self, now: u64) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => CoreError::AlreadyRunning,
                _ => CoreError::IoError(e),
            })?;
        writeln!(file, "{}{}{}", START_LABEL, SEPARATOR, now)?;
        debug!("Started stopwatch {}", self.path.display());
        Ok(())
    }

    /// Stop the stopwatch, discarding every recorded time
    pub fn stop(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(not_running_on_missing)?;
        debug!("Stopped stopwatch {}", self.path.display());
        Ok(())
    }

    /// Append an entry at `now`
    ///
    /// Without a label the entry is numbered after the existing ones. Labels
    /// spanning more than one line are rejected.
    pub fn record(&self, now: u64, label: Option<&str>) -> Result<()> {
        let label = match label {
            Some(label) if label.contains(['\n', '\r']) => {
                return Err(CoreError::InvalidLabel(label.escape_debug().to_string()));
            }
            Some(label) => label.to_string(),
            None => (self.times()?.len() + 1).to_string(),
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(not_running_on_missing)?;
        writeln!(file, "{}{}{}", label, SEPARATOR, now)?;
        debug!("Recorded {:?} at {} in {}", label, now, self.path.display());
        Ok(())
    }

    /// Record an entry and return its split time
    pub fn split(&self, now: u64, label: Option<&str>) -> Result<f64> {
        self.record(now, label)?;
        self.last_time().map(|t| t.split)
    }

    /// Record an entry and return its lap time
    pub fn lap(&self, now: u64, label: Option<&str>) -> Result<f64> {
        self.record(now, label)?;
        self.last_time().map(|t| t.lap)
    }

    /// Every recorded entry except the start, in file order
    pub fn times(&self) -> Result<Vec<Time>> {
        let stored = self.stored_times()?;
        let (start, rest) = stored
            .split_first()
            .ok_or_else(|| CoreError::CorruptStore("missing start entry".to_string()))?;

        let mut prev = start.nanoseconds;
        let times = rest
            .iter()
            .map(|time| {
                let t = Time {
                    label: time.label.clone(),
                    split: seconds_between(start.nanoseconds, time.nanoseconds),
                    lap: seconds_between(prev, time.nanoseconds),
                };
                prev = time.nanoseconds;
                t
            })
            .collect();
        Ok(times)
    }

    /// The time that would be recorded at `now`, without recording it
    pub fn elapsed(&self, now: u64) -> Result<Time> {
        let stored = self.stored_times()?;
        let (start, last) = match (stored.first(), stored.last()) {
            (Some(start), Some(last)) => (start.nanoseconds, last.nanoseconds),
            _ => return Err(CoreError::CorruptStore("missing start entry".to_string())),
        };
        Ok(Time {
            label: stored.len().to_string(),
            split: seconds_between(start, now),
            lap: seconds_between(last, now),
        })
    }

    /// Look up a recorded time by label
    pub fn find(&self, label: &str) -> Result<Time> {
        self.times()?
            .into_iter()
            .find(|t| t.label == label)
            .ok_or_else(|| CoreError::InvalidLabel(label.to_string()))
    }

    fn last_time(&self) -> Result<Time> {
        self.times()?
            .pop()
            .ok_or_else(|| CoreError::CorruptStore("no recorded time".to_string()))
    }

    fn stored_times(&self) -> Result<Vec<StoredTime>> {
        let file = File::open(&self.path).map_err(not_running_on_missing)?;
        let mut stored = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            stored.push(StoredTime::parse(&line)?);
        }
        Ok(stored)
    }
}

fn not_running_on_missing(e: io::Error) -> CoreError {
    match e.kind() {
        io::ErrorKind::NotFound => CoreError::NotRunning,
        _ => CoreError::IoError(e),
    }
}
