//! Transcript logging
//!
//! Appends displayed turns to a plain text file. Logging starts from the
//! `--log` flag or the `/log` command and can be paused and resumed; it is
//! not persistence — nothing is ever read back from the file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: log_file,
            is_active: false,
        };

        // A file provided at startup enables logging immediately
        if let Some(path) = logging.file_path.clone() {
            logging.test_file_access(&path)?;
            logging.is_active = true;
            logging.write_session_header()?;
        }

        Ok(logging)
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;
        self.write_session_header()?;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                self.is_active = !self.is_active;
                if self.is_active {
                    Ok(format!("Logging resumed to: {path}"))
                } else {
                    Ok(format!("Logging paused (file: {path})"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active {
            return Ok(());
        }
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        // Write each line of content, preserving the exact formatting
        for line in content.lines() {
            writeln!(file, "{line}")?;
        }

        // Blank line after each message for spacing, matching the display
        writeln!(file)?;

        file.flush()?;
        Ok(())
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn write_session_header(&self) -> Result<(), Box<dyn std::error::Error>> {
        let started = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.log_message(&format!("## Session started {started}"))
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}
