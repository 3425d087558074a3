use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Appends level-tagged lines to `$HOME/.ontoctl/logs/latest.log`.
#[derive(Clone)]
pub struct Logger {
    log_file_path: PathBuf,
    file_handle: Arc<Mutex<Option<std::fs::File>>>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let log_file_path = Self::log_path();
        let logs_dir = log_file_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        fs::create_dir_all(&logs_dir)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file_path)?;

        Ok(Self {
            log_file_path,
            file_handle: Arc::new(Mutex::new(Some(file))),
        })
    }

    /// Resolved from HOME at call time so tests can redirect it.
    pub fn log_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".ontoctl").join("logs").join("latest.log")
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.log_file_path
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        let timestamp: DateTime<Utc> = Utc::now();
        let formatted_timestamp = timestamp.format("%Y-%m-%d %H:%M:%S%.3f UTC");

        let log_line = format!("[{}] [{}] {}\n", formatted_timestamp, level, message);

        if let Ok(mut file_guard) = self.file_handle.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.write_all(log_line.as_bytes());
                let _ = file.flush();
            }
        }
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new().unwrap_or_else(|e| {
            eprintln!("Failed to initialize logger: {}", e);
            // Degrade to a logger that drops every line
            Self {
                log_file_path: Self::log_path(),
                file_handle: Arc::new(Mutex::new(None)),
            }
        })
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_global_logger() -> Result<(), Box<dyn std::error::Error>> {
    let logger = Logger::new()?;
    GLOBAL_LOGGER.set(logger).map_err(|_| "Logger already initialized")?;
    Ok(())
}

pub fn get_global_logger() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

// Convenience functions for global logging
pub fn log(level: LogLevel, message: &str) {
    if let Some(logger) = get_global_logger() {
        logger.log(level, message);
    }
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn warn(message: &str) {
    log(LogLevel::Warn, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}
