use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
    sync::Mutex,
};

use crate::{IntoIoError, IoError};

pub struct LoggingState {
    writer: BufWriter<std::fs::File>,
}

impl LoggingState {
    /// Opens (or creates) the log file at `path` in append mode
    /// and stamps it with the current date and time.
    ///
    /// # Errors
    /// If the file or its parent directory could not be created.
    pub fn create(path: &Path) -> Result<LoggingState, IoError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).path(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true) // Create file if it doesn't exist
            .append(true) // Append to the file instead of overwriting
            .open(path)
            .path(path)?;

        let mut state = LoggingState {
            writer: BufWriter::new(file),
        };
        let now = chrono::Local::now();
        state.write_str(&format!(
            "=== mcmeta run started {} ===\n",
            now.format("%Y-%m-%d %H:%M:%S")
        ));
        Ok(state)
    }

    pub fn write_str(&mut self, s: &str) {
        let _ = self.writer.write_all(s.as_bytes());
        let _ = self.writer.flush();
    }
}

/// The log file every macro in this module mirrors its output into.
/// `None` until [`logger_init`] is called.
pub static LOGGER: Mutex<Option<LoggingState>> = Mutex::new(None);

/// Starts mirroring all printed messages into the file at `path`.
///
/// # Errors
/// If the log file could not be opened.
pub fn logger_init(path: &Path) -> Result<(), IoError> {
    let state = LoggingState::create(path)?;
    if let Ok(mut logger) = LOGGER.lock() {
        *logger = Some(state);
    }
    Ok(())
}

/// Flushes and closes the log file, if any.
pub fn logger_finish() {
    if let Ok(mut logger) = LOGGER.lock() {
        *logger = None;
    }
}

#[doc(hidden)]
pub fn log_line(plain_text: &str) {
    if let Ok(mut logger) = LOGGER.lock() {
        if let Some(logger) = &mut *logger {
            logger.write_str(plain_text);
        }
    }
}

/// Print an informational message.
/// Saved to the log file.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        let plain_text = format!("[info] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            print!("{plain_text}")
        } else {
            println!("{} {}", colored::Colorize::yellow("[info]"), format_args!($($arg)*))
        }

        $crate::print::log_line(&plain_text);
    };
}

/// Print a warning. Processing carries on afterwards.
/// Saved to the log file.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        let plain_text = format!("[warn] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            print!("{plain_text}")
        } else {
            println!("{} {}", colored::Colorize::bright_yellow("[warn]"), format_args!($($arg)*))
        }

        $crate::print::log_line(&plain_text);
    };
}

/// Print an error message.
/// Saved to the log file.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        // Ugly hack to fix compiler error
        if true {
            let plain_text = format!("[error] {}\n", format_args!($($arg)*));

            if cfg!(windows) {
                eprint!("{plain_text}")
            } else {
                eprintln!("{} {}", colored::Colorize::red("[error]"), format_args!($($arg)*))
            }

            $crate::print::log_line(&plain_text);
        }
    };
}

/// Print an error message to stdout instead of stderr,
/// for problems that are part of a run's regular report.
/// Saved to the log file.
#[macro_export]
macro_rules! err_stdout {
    ($($arg:tt)*) => {
        let plain_text = format!("[error] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            print!("{plain_text}")
        } else {
            println!("{} {}", colored::Colorize::red("[error]"), format_args!($($arg)*))
        }

        $crate::print::log_line(&plain_text);
    };
}

/// Print a point message, ie. a small step in some process.
/// Saved to the log file.
#[macro_export]
macro_rules! pt {
    ($($arg:tt)*) => {
        let plain_text = format!("[plain] {}\n", format_args!($($arg)*));

        if cfg!(windows) {
            println!("- {}", format_args!($($arg)*))
        } else {
            println!("{} {}", colored::Colorize::bold("-"), format_args!($($arg)*))
        }

        $crate::print::log_line(&plain_text);
    };
}
