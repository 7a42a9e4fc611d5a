//! Logger setup.
//!
//! The terminal UI owns stdout/stderr while the game runs, so the game logs
//! to a file. `RUST_LOG` wins over the configured level when set.

use env_logger::{Builder, Env, Target};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn builder(default_level: &str) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format_timestamp_millis();
    builder
}

/// Route `log` output to a file.
pub fn init_file_logger(path: &Path, default_level: &str) -> io::Result<()> {
    let file = open_log_file(path)?;
    builder(default_level)
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Route `log` output to stderr (headless tools).
pub fn init_stderr_logger(default_level: &str) -> io::Result<()> {
    builder(default_level)
        .target(Target::Stderr)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = std::env::temp_dir().join(format!("flappy-log-test-{}", std::process::id()));
        let path = dir.join("nested").join("game.log");

        {
            let mut file = open_log_file(&path).expect("open log");
            writeln!(file, "first").expect("write");
        }
        {
            let mut file = open_log_file(&path).expect("reopen log");
            writeln!(file, "second").expect("write");
        }

        let contents = fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "first\nsecond\n");
        let _ = fs::remove_dir_all(dir);
    }
}
