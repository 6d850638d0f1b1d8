use crate::core::app::App;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if trimmed.starts_with("/log") {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts.len() {
            1 => {
                // Just "/log" - toggle logging if file is set
                match app.logging.toggle_logging() {
                    Ok(message) => app.set_status(message),
                    Err(e) => app.set_status(format!("Error: {e}")),
                }
                CommandResult::Continue
            }
            2 => {
                // "/log <filename>" - set log file and enable logging
                let filename = parts[1];
                match app.logging.set_log_file(filename.to_string()) {
                    Ok(message) => app.set_status(message),
                    Err(e) => app.set_status(format!("Error setting log file: {e}")),
                }
                CommandResult::Continue
            }
            _ => {
                app.set_status(
                    "Usage: /log [filename] - Enable logging to file, or /log to toggle pause/resume",
                );
                CommandResult::Continue
            }
        }
    } else {
        // Not a command, process as regular message
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EnvConfig;
    use tempfile::tempdir;

    fn test_app() -> App {
        App::new(EnvConfig::default(), None).unwrap()
    }

    #[test]
    fn plain_text_passes_through_as_a_message() {
        let mut app = test_app();
        match process_input(&mut app, "hello there") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "hello there"),
            CommandResult::Continue => panic!("expected message passthrough"),
        }
    }

    #[test]
    fn log_toggle_without_file_reports_an_error() {
        let mut app = test_app();
        assert!(matches!(
            process_input(&mut app, "/log"),
            CommandResult::Continue
        ));
        assert!(app.status.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn log_with_filename_enables_logging() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let mut app = test_app();

        let command = format!("/log {}", path.display());
        assert!(matches!(
            process_input(&mut app, &command),
            CommandResult::Continue
        ));
        assert!(app.status.as_deref().unwrap().contains("Logging enabled"));
        assert_eq!(app.get_logging_status(), "active (chat.log)");
    }

    #[test]
    fn log_with_too_many_arguments_shows_usage() {
        let mut app = test_app();
        process_input(&mut app, "/log a b c");
        assert!(app.status.as_deref().unwrap().starts_with("Usage:"));
    }
}
