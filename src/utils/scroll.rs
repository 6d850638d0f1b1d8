use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::core::message::Message;

/// Handles all scroll-related calculations and line building
pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Build display lines for the given messages. Callers pass the
    /// displayable transcript view; system messages never reach this point.
    pub fn build_display_lines<'a>(
        messages: impl IntoIterator<Item = &'a Message>,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for msg in messages {
            Self::add_message_lines(&mut lines, msg);
        }

        lines
    }

    fn add_message_lines(lines: &mut Vec<Line<'static>>, msg: &Message) {
        if msg.is_user() {
            // User messages: cyan with "You:" prefix
            lines.push(Line::from(vec![
                Span::styled(
                    "You: ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(msg.content.clone(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(""));
        } else if msg.is_assistant() && !msg.content.is_empty() {
            // Assistant messages: no prefix, content in default white
            for content_line in msg.content.lines() {
                if content_line.trim().is_empty() {
                    lines.push(Line::from(""));
                } else {
                    lines.push(Line::from(Span::styled(
                        content_line.to_string(),
                        Style::default().fg(Color::White),
                    )));
                }
            }
            lines.push(Line::from(""));
        }
    }

    /// Calculate how many wrapped lines the given lines will take
    pub fn calculate_wrapped_line_count(lines: &[Line], terminal_width: u16) -> u16 {
        let mut total_wrapped_lines = 0u16;

        for line in lines {
            let line_text = line.to_string();
            // Trim whitespace to match ratatui's Wrap { trim: true } behavior
            let trimmed_text = line_text.trim();

            if trimmed_text.is_empty() || terminal_width == 0 {
                total_wrapped_lines = total_wrapped_lines.saturating_add(1);
            } else {
                let wrapped_count = Self::calculate_word_wrapped_lines(trimmed_text, terminal_width);
                total_wrapped_lines = total_wrapped_lines.saturating_add(wrapped_count);
            }
        }

        total_wrapped_lines
    }

    /// Calculate how many lines a single text string will wrap to
    fn calculate_word_wrapped_lines(text: &str, terminal_width: u16) -> u16 {
        let mut current_line_len = 0;
        let mut line_count = 1u16;

        for word in text.split_whitespace() {
            let word_len = word.width();

            // Start new line if adding this word would exceed width
            if current_line_len > 0 && current_line_len + 1 + word_len > terminal_width as usize {
                line_count = line_count.saturating_add(1);
                current_line_len = word_len;
            } else {
                if current_line_len > 0 {
                    current_line_len += 1; // Add space
                }
                current_line_len += word_len;
            }
        }

        line_count
    }

    /// Scroll offset that shows the bottom of the given lines
    pub fn calculate_max_scroll_offset(
        lines: &[Line],
        terminal_width: u16,
        available_height: u16,
    ) -> u16 {
        let total_wrapped_lines = Self::calculate_wrapped_line_count(lines, terminal_width);
        if total_wrapped_lines > available_height {
            total_wrapped_lines.saturating_sub(available_height)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_and_assistant_messages_produce_spaced_lines() {
        let messages = vec![Message::user("hi"), Message::assistant("hello\n\nthere")];
        let lines = ScrollCalculator::build_display_lines(&messages);

        // user line + spacer, then three assistant content lines + spacer
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].to_string(), "You: hi");
        assert_eq!(lines[2].to_string(), "hello");
        assert_eq!(lines[3].to_string(), "");
        assert_eq!(lines[4].to_string(), "there");
    }

    #[test]
    fn empty_assistant_messages_render_nothing() {
        let messages = vec![Message::assistant("")];
        let lines = ScrollCalculator::build_display_lines(&messages);
        assert!(lines.is_empty());
    }

    #[test]
    fn short_lines_do_not_wrap() {
        let lines = vec![Line::from("short")];
        assert_eq!(ScrollCalculator::calculate_wrapped_line_count(&lines, 80), 1);
    }

    #[test]
    fn long_lines_wrap_by_words() {
        let lines = vec![Line::from("one two three four")];
        // Width 9 fits "one two" on the first line, then "three" and "four"
        assert_eq!(ScrollCalculator::calculate_wrapped_line_count(&lines, 9), 3);
    }

    #[test]
    fn zero_width_counts_each_line_once() {
        let lines = vec![Line::from("anything at all")];
        assert_eq!(ScrollCalculator::calculate_wrapped_line_count(&lines, 0), 1);
    }

    #[test]
    fn max_scroll_offset_is_zero_when_content_fits() {
        let lines = vec![Line::from("a"), Line::from("b")];
        assert_eq!(
            ScrollCalculator::calculate_max_scroll_offset(&lines, 80, 10),
            0
        );
    }

    #[test]
    fn max_scroll_offset_reaches_the_bottom() {
        let lines: Vec<Line> = (0..10).map(|i| Line::from(format!("line {i}"))).collect();
        assert_eq!(
            ScrollCalculator::calculate_max_scroll_offset(&lines, 80, 4),
            6
        );
    }
}
