use std::time::Instant;

use ratatui::text::Line;

use crate::api::client::CompletionError;
use crate::api::ChatMessage;
use crate::core::config::EnvConfig;
use crate::core::constants::DEFAULT_SYSTEM_PROMPT;
use crate::core::message::Message;
use crate::core::session::Transcript;
use crate::utils::logging::LoggingState;
use crate::utils::scroll::ScrollCalculator;

/// Application state for one chat session. Owns the transcript and the
/// turn-handling logic; the event loop and renderer borrow it.
pub struct App {
    pub transcript: Transcript,
    pub input: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub awaiting_reply: bool,
    pub pulse_start: Instant,
    pub status: Option<String>,
    pub logging: LoggingState,
    pub config: EnvConfig,
}

impl App {
    pub fn new(
        config: EnvConfig,
        log_file: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState::new(log_file)?;

        Ok(App {
            transcript: Transcript::new(DEFAULT_SYSTEM_PROMPT),
            input: String::new(),
            scroll_offset: 0,
            auto_scroll: true,
            awaiting_reply: false,
            pulse_start: Instant::now(),
            status: None,
            logging,
            config,
        })
    }

    pub fn build_display_lines(&self) -> Vec<Line<'static>> {
        ScrollCalculator::build_display_lines(self.transcript.displayable())
    }

    pub fn calculate_wrapped_line_count(&self, terminal_width: u16) -> u16 {
        let lines = self.build_display_lines();
        ScrollCalculator::calculate_wrapped_line_count(&lines, terminal_width)
    }

    pub fn calculate_max_scroll_offset(&self, available_height: u16, terminal_width: u16) -> u16 {
        let lines = self.build_display_lines();
        ScrollCalculator::calculate_max_scroll_offset(&lines, terminal_width, available_height)
    }

    /// Record a user message and snapshot the full transcript for one
    /// completion request. The next submission is locked until
    /// [`finish_turn`](Self::finish_turn) runs.
    pub fn begin_turn(&mut self, content: String) -> Vec<ChatMessage> {
        self.clear_status();

        if let Err(e) = self.logging.log_message(&format!("You: {content}")) {
            self.set_status(format!("Failed to log message: {e}"));
        }

        self.transcript.append(Message::user(content));
        self.awaiting_reply = true;
        self.pulse_start = Instant::now();

        self.transcript.to_api_messages()
    }

    /// Apply one turn outcome. On success the assistant reply is appended;
    /// on failure nothing is appended — the user message stays recorded and
    /// the status line reports the error.
    pub fn finish_turn(&mut self, outcome: Result<String, CompletionError>) {
        self.awaiting_reply = false;

        match outcome {
            Ok(reply) => {
                if let Err(e) = self.logging.log_message(&reply) {
                    self.set_status(format!("Failed to log response: {e}"));
                }
                self.transcript.append(Message::assistant(reply));
            }
            Err(e) => {
                self.set_status(format!("Completion failed: {e}"));
            }
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, s: S) {
        self.status = Some(s.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn connection_status(&self) -> &'static str {
        if self.config.is_connected() {
            "Connected"
        } else {
            "Not connected (API key missing)"
        }
    }

    pub fn get_logging_status(&self) -> String {
        self.logging.get_status_string()
    }

    pub fn update_scroll_position(&mut self, available_height: u16, terminal_width: u16) {
        if self.auto_scroll {
            let total_wrapped_lines = self.calculate_wrapped_line_count(terminal_width);
            if total_wrapped_lines > available_height {
                self.scroll_offset = total_wrapped_lines.saturating_sub(available_height);
            } else {
                self.scroll_offset = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    fn test_app() -> App {
        App::new(
            EnvConfig {
                api_key: Some("test-key".to_string()),
                endpoint: Some("https://example.openai.azure.com".to_string()),
                deployment: Some("gpt-4o-mini".to_string()),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn begin_turn_snapshots_the_full_transcript() {
        let mut app = test_app();
        let api_messages = app.begin_turn("hi".to_string());

        assert!(app.awaiting_reply);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
        assert_eq!(api_messages[1].content, "hi");
    }

    #[test]
    fn successful_turn_appends_the_reply() {
        let mut app = test_app();
        app.begin_turn("hi".to_string());
        app.finish_turn(Ok("hello".to_string()));

        assert!(!app.awaiting_reply);
        assert!(app.status.is_none());

        let roles: Vec<Role> = app.transcript.all().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(app.transcript.last().unwrap().content, "hello");
    }

    #[test]
    fn failed_turn_keeps_the_user_message_and_sets_a_status() {
        let mut app = test_app();
        app.begin_turn("hi".to_string());
        app.finish_turn(Err(CompletionError::EmptyChoices));

        assert!(!app.awaiting_reply);
        // Omit policy: no assistant entry is appended
        assert_eq!(app.transcript.len(), 2);
        assert!(app.transcript.last().unwrap().is_user());

        let status = app.status.as_deref().unwrap();
        assert!(status.contains("Completion failed"));
    }

    #[test]
    fn five_turns_grow_the_transcript_to_eleven_messages() {
        let mut app = test_app();
        for n in 1..=5 {
            app.begin_turn(format!("question {n}"));
            app.finish_turn(Ok(format!("answer {n}")));
        }
        assert_eq!(app.transcript.len(), 11);
    }

    #[test]
    fn begin_turn_clears_a_stale_status() {
        let mut app = test_app();
        app.set_status("old failure");
        app.begin_turn("hi".to_string());
        assert!(app.status.is_none());
    }

    #[test]
    fn missing_credential_still_accepts_input() {
        let mut app = App::new(EnvConfig::default(), None).unwrap();
        assert_eq!(app.connection_status(), "Not connected (API key missing)");

        // The turn proceeds; the failure only surfaces through the client
        let api_messages = app.begin_turn("hi".to_string());
        assert_eq!(api_messages.len(), 2);
    }
}
