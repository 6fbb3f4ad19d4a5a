use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_FILE_NAME: &str = "sweepbox.log";

/// Picks where log lines are written.
///
/// The full-screen UI owns the terminal while it runs, so interactive
/// sessions append to `<config_dir>/sweepbox.log`. If that file cannot be
/// opened the lines are dropped. Every other mode logs to stderr.
pub fn log_writer(interactive: bool, config_dir: &Path) -> BoxMakeWriter {
    if !interactive {
        return BoxMakeWriter::new(io::stderr);
    }

    match open_log_file(config_dir) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::sink),
    }
}

fn open_log_file(config_dir: &Path) -> io::Result<File> {
    fs::create_dir_all(config_dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(config_dir.join(LOG_FILE_NAME))
}
