//! Line producer feeding the extraction loop over a channel.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Poll interval while waiting for appended lines in follow mode.
const FOLLOW_POLL: std::time::Duration = std::time::Duration::from_millis(500);

/// Spawn the reader thread for `path`.
///
/// Lines are sent without their trailing line break. In follow mode the
/// thread keeps polling the file for appended data after the first EOF and
/// only ever forwards complete lines, buffering a partially written tail
/// until its line break arrives. The thread stops when the receiving side
/// hangs up or, outside follow mode, at EOF.
pub fn spawn(path: PathBuf, follow: bool, tx: Sender<String>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(err) = read_lines(&path, follow, &tx) {
            log::error!("Error reading {}: {}", path.display(), err);
        }
    })
}

fn read_lines(path: &PathBuf, follow: bool, tx: &Sender<String>) -> std::io::Result<()> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::new(file);
    let mut pending = String::new();

    loop {
        let mut segment = String::new();
        let read = reader.read_line(&mut segment)?;

        if read == 0 {
            if !follow {
                // A final line without a trailing break still counts.
                if !pending.is_empty() && tx.send(take_line(&mut pending)).is_err() {
                    return Ok(());
                }
                return Ok(());
            }
            std::thread::sleep(FOLLOW_POLL);
            continue;
        }

        pending.push_str(&segment);
        if pending.ends_with('\n') && tx.send(take_line(&mut pending)).is_err() {
            // Receiver hung up; stop producing.
            return Ok(());
        }
    }
}

/// Detach the buffered line, stripped of its line break.
fn take_line(pending: &mut String) -> String {
    let line = pending.trim_end_matches(['\n', '\r']).to_string();
    pending.clear();
    line
}
