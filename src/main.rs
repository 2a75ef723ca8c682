use std::io::{self, BufRead, Write};

use anyhow::Result;
use attendance_ledger::api;
use attendance_ledger::config::Config;
use attendance_ledger::ledger::Ledger;
use chrono::Local;
use tracing::{info, warn};
use tracing_appender::rolling;

/// Reads one recognized fingerprint identifier per line (as produced by the
/// sensor process) and prints the ledger's response for each as JSON.
fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Ledger starting...");

    let ledger = Ledger::open(&config.ledger())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().split(b'\n') {
        let Some(fingerprint_id) = read_identifier(line?) else {
            continue;
        };

        let response =
            api::attendance::record_attendance(&ledger, &fingerprint_id, Local::now().naive_local())?;
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    info!("Input closed, ledger stopping");
    Ok(())
}

/// Identifier on one input line. Blank lines and lines that are not UTF-8
/// yield nothing; the feed keeps going after either.
fn read_identifier(line: Vec<u8>) -> Option<String> {
    let line = match String::from_utf8(line) {
        Ok(line) => line,
        Err(e) => {
            warn!(bytes = e.as_bytes().len(), "skipping input line that is not UTF-8");
            return None;
        }
    };
    let id = line.trim();
    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_lines_do_not_stop_the_feed() {
        let input: &[u8] = b"12\n\xff\xfe\n\n  7 \r\n";

        let ids: Vec<String> = input
            .split(|b| *b == b'\n')
            .filter_map(|line| read_identifier(line.to_vec()))
            .collect();

        assert_eq!(ids, vec!["12".to_string(), "7".to_string()]);
    }

    #[test]
    fn reads_from_a_buffered_feed() {
        let input = io::Cursor::new(b"\xc3\x28\n42\n".to_vec());

        let ids: Vec<String> = input
            .split(b'\n')
            .map(|line| line.unwrap())
            .filter_map(read_identifier)
            .collect();

        assert_eq!(ids, vec!["42".to_string()]);
    }
}
