//! `sw`: record elapsed times from the command line
//!
//! Every invocation from the same shell talks to the same stopwatch, because
//! the stopwatch file is named after the parent process identifier.

pub mod error;

pub use error::{CliError, Result};

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use sw_core::{get_parent_process_id, Config, Stopwatch, Time};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(about = "record elapsed times")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Prints to stdout instead of stderr
    #[arg(short = '1', long = "stdout")]
    pub stdout: bool,

    /// Directory holding stopwatch files (overrides SW_DATA_DIR)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelArg {
    /// Time label
    pub label: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Starts the stopwatch
    Start,
    /// Stops the stopwatch
    Stop,
    /// Records a time
    Record(LabelArg),
    /// Records and prints a split time
    Split(LabelArg),
    /// Records and prints a lap time
    Lap(LabelArg),
    /// Prints the elapsed time
    Elapsed {
        #[command(flatten)]
        label: LabelArg,
        /// Prints the lap time instead of the split time
        #[arg(short, long)]
        lap: bool,
    },
    /// Prints the recorded split and lap times
    Times,
    /// Prints the parent process ID that keys the stopwatch
    Ppid,
}

impl Cli {
    /// Resolve the configuration, preferring `--data-dir` over the environment
    pub fn config(&self) -> Result<Config> {
        let config = match &self.data_dir {
            Some(dir) => {
                let config = Config::new(dir);
                config.validate()?;
                config
            }
            None => Config::from_env()?,
        };
        Ok(config)
    }
}

/// Run a command against a stopwatch at instant `now`
///
/// Returns the text to print, if any. Without a command the stopwatch toggles:
/// a running one is stopped and its elapsed time reported, otherwise it starts.
pub fn run(stopwatch: &Stopwatch, command: Option<&Commands>, now: u64) -> Result<Option<String>> {
    debug!("Running {:?} against {}", command, stopwatch.path().display());

    let output = match command {
        Some(Commands::Start) => {
            stopwatch.start(now)?;
            None
        }
        Some(Commands::Stop) => {
            stopwatch.stop()?;
            None
        }
        Some(Commands::Record(arg)) => {
            stopwatch.record(now, arg.label.as_deref())?;
            None
        }
        Some(Commands::Split(arg)) => {
            Some(stopwatch.split(now, arg.label.as_deref())?.to_string())
        }
        Some(Commands::Lap(arg)) => Some(stopwatch.lap(now, arg.label.as_deref())?.to_string()),
        Some(Commands::Elapsed { label, lap }) => {
            let time = match &label.label {
                Some(label) => stopwatch.find(label)?,
                None => stopwatch.elapsed(now)?,
            };
            let seconds = if *lap { time.lap } else { time.split };
            Some(seconds.to_string())
        }
        Some(Commands::Times) => format_times(&stopwatch.times()?),
        Some(Commands::Ppid) => Some(get_parent_process_id().to_string()),
        None => match stopwatch.elapsed(now) {
            Ok(time) => {
                stopwatch.stop()?;
                info!("Stopped stopwatch after {}s", time.split);
                Some(format!("Time elapsed: {}s", time.split))
            }
            Err(e) => {
                debug!("No elapsed time ({}), starting", e);
                stopwatch.start(now)?;
                None
            }
        },
    };
    Ok(output)
}

/// Render times as `label split lap` rows, each column padded to its widest cell
///
/// Returns `None` when nothing has been recorded.
pub fn format_times(times: &[Time]) -> Option<String> {
    let label_width = times.iter().map(|t| t.label.len()).max()?;
    let split_width = times.iter().map(|t| t.split.to_string().len()).max()?;
    let lap_width = times.iter().map(|t| t.lap.to_string().len()).max()?;

    let rows: Vec<String> = times
        .iter()
        .map(|t| {
            format!(
                "{0:1$} {2:3$} {4:5$}",
                t.label, label_width, t.split, split_width, t.lap, lap_width
            )
        })
        .collect();
    Some(rows.join("\n"))
}

/// Write command output to stdout or stderr
pub fn emit(text: &str, to_stdout: bool) -> Result<()> {
    if to_stdout {
        writeln!(std::io::stdout().lock(), "{}", text)?;
    } else {
        writeln!(std::io::stderr().lock(), "{}", text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: u64 = 1_000_000_000;

    fn temp_stopwatch() -> (tempfile::TempDir, Stopwatch) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let sw = Stopwatch::new(tmp.path().join("42"));
        (tmp, sw)
    }

    fn label(s: &str) -> LabelArg {
        LabelArg {
            label: Some(s.to_string()),
        }
    }

    #[test]
    fn test_parse_flags_and_subcommands() {
        let cli = Cli::try_parse_from(["sw", "-1", "elapsed", "lunch", "--lap"]).unwrap();
        assert!(cli.stdout);
        assert_eq!(
            cli.command,
            Some(Commands::Elapsed {
                label: label("lunch"),
                lap: true
            })
        );

        let cli = Cli::try_parse_from(["sw"]).unwrap();
        assert!(!cli.stdout);
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["sw", "split"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Split(LabelArg::default())));
    }

    #[test]
    fn test_relative_data_dir_rejected() {
        let cli = Cli::try_parse_from(["sw", "--data-dir", "relative", "times"]).unwrap();
        assert!(matches!(
            cli.config(),
            Err(CliError::Core(sw_core::CoreError::ConfigurationError(_)))
        ));
    }

    #[test]
    fn test_toggle_starts_then_stops() {
        let (_tmp, sw) = temp_stopwatch();
        assert_eq!(run(&sw, None, 0).unwrap(), None);
        assert!(sw.is_running());

        let out = run(&sw, None, 3 * SEC).unwrap();
        assert_eq!(out.as_deref(), Some("Time elapsed: 3s"));
        assert!(!sw.is_running());
    }

    #[test]
    fn test_split_lap_and_elapsed() {
        let (_tmp, sw) = temp_stopwatch();
        run(&sw, Some(&Commands::Start), 0).unwrap();
        let out = run(&sw, Some(&Commands::Split(label("a"))), 2 * SEC).unwrap();
        assert_eq!(out.as_deref(), Some("2"));
        let out = run(&sw, Some(&Commands::Lap(LabelArg::default())), 5 * SEC).unwrap();
        assert_eq!(out.as_deref(), Some("3"));

        let elapsed_a = Commands::Elapsed {
            label: label("a"),
            lap: false,
        };
        assert_eq!(run(&sw, Some(&elapsed_a), 100 * SEC).unwrap().as_deref(), Some("2"));

        let elapsed_now_lap = Commands::Elapsed {
            label: LabelArg::default(),
            lap: true,
        };
        assert_eq!(
            run(&sw, Some(&elapsed_now_lap), 6 * SEC).unwrap().as_deref(),
            Some("1")
        );
    }

    #[test]
    fn test_unknown_label_is_error() {
        let (_tmp, sw) = temp_stopwatch();
        run(&sw, Some(&Commands::Start), 0).unwrap();
        let cmd = Commands::Elapsed {
            label: label("missing"),
            lap: false,
        };
        let err = run(&sw, Some(&cmd), SEC).unwrap_err();
        assert_eq!(err.to_string(), "Invalid label missing");
    }

    #[test]
    fn test_times_table() {
        let (_tmp, sw) = temp_stopwatch();
        run(&sw, Some(&Commands::Start), 0).unwrap();
        assert_eq!(run(&sw, Some(&Commands::Times), 0).unwrap(), None);

        run(&sw, Some(&Commands::Record(LabelArg::default())), SEC / 2).unwrap();
        run(&sw, Some(&Commands::Record(label("build"))), 12 * SEC).unwrap();

        let table = run(&sw, Some(&Commands::Times), 0).unwrap().unwrap();
        assert_eq!(table, "1     0.5  0.5\nbuild  12 11.5");
    }

    #[test]
    fn test_ppid_reports_parent() {
        let (_tmp, sw) = temp_stopwatch();
        let out = run(&sw, Some(&Commands::Ppid), 0).unwrap().unwrap();
        assert_eq!(out, get_parent_process_id().to_string());
        assert!(!sw.is_running());
    }
}
