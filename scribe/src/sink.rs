//! Destinations for generated wire lines.

use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Where emitted lines land: appended to a log file, or stdout.
#[derive(Debug)]
pub enum LineSink {
    File(PathBuf),
    Stdout,
}

impl LineSink {
    /// Resolve a sink from an optional `--log` argument, expanding `~` and
    /// environment variables in the path.
    pub fn resolve(log_path: Option<&str>) -> Self {
        match log_path {
            Some(path) => LineSink::File(PathBuf::from(
                shellexpand::tilde(path).into_owned(),
            )),
            None => LineSink::Stdout,
        }
    }

    /// Write `lines` to the sink, optionally prefixed with a bracketed
    /// wall-clock timestamp so they blend into surrounding log output.
    /// Successive lines get strictly increasing millisecond timestamps.
    pub fn write_lines(&self, lines: &[String], timestamps: bool) -> Result<()> {
        let base = chrono::Local::now();
        let rendered = lines.iter().enumerate().map(|(position, line)| {
            if timestamps {
                let stamp = base + chrono::Duration::milliseconds(position as i64);
                format!("[{}] {}", stamp.format("%Y-%m-%d %H:%M:%S%.3f"), line)
            } else {
                line.clone()
            }
        });

        match self {
            LineSink::File(path) => {
                let mut file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                for line in rendered {
                    writeln!(file, "{}", line)?;
                }
                log::info!("Appended {} wire lines to {}", lines.len(), path.display());
            }
            LineSink::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                for line in rendered {
                    writeln!(handle, "{}", line)?;
                }
            }
        }

        Ok(())
    }
}
