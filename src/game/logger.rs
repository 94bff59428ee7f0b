//! Centralized, thread-safe game event logger
//!
//! One logger is owned by the engine and shared by every request. Entries can
//! go to stderr, to an in-memory buffer, or both; stdout is left to whatever
//! the caller prints (the CLI prints game documents there).

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - game creation and evolutions only
    Minimal = 1,
    /// Normal - phases and player actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every roll and store access
    Verbose = 3,
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stderr (default)
    #[default]
    Stderr,
    /// Capture only to in-memory buffer
    Memory,
    /// Both stderr and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    /// Event family, e.g. "phase", "summon", "evolution"
    pub category: String,
    pub message: String,
}

/// Read-only access to captured entries; holds the buffer lock while alive
pub struct LogGuard<'a> {
    guard: MutexGuard<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: Mutex<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        GameLogger {
            verbosity: VerbosityLevel::default(),
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: Mutex::new(Vec::new()),
        }
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            ..Self::new()
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Captured entries, in logging order
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.buffer(),
        }
    }

    pub fn clear_logs(&self) {
        self.buffer().clear();
    }

    pub fn minimal(&self, category: &str, message: &str) {
        self.log(VerbosityLevel::Minimal, category, message);
    }

    pub fn normal(&self, category: &str, message: &str) {
        self.log(VerbosityLevel::Normal, category, message);
    }

    pub fn verbose(&self, category: &str, message: &str) {
        self.log(VerbosityLevel::Verbose, category, message);
    }

    fn log(&self, level: VerbosityLevel, category: &str, message: &str) {
        if level > self.verbosity || self.verbosity == VerbosityLevel::Silent {
            return;
        }

        let entry = LogEntry {
            level,
            category: category.to_string(),
            message: message.to_string(),
        };

        if matches!(self.output_mode, OutputMode::Stderr | OutputMode::Both) {
            self.write_stderr(&entry);
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.buffer().push(entry);
        }
    }

    fn write_stderr(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => eprintln!("[{}] {}", entry.category, entry.message),
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => eprintln!("{line}"),
                Err(_) => eprintln!("[{}] {}", entry.category, entry.message),
            },
        }
    }

    // A panic while holding the buffer can only leave a complete Vec behind
    fn buffer(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.log_buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("output_format", &self.output_format)
            .finish()
    }
}
