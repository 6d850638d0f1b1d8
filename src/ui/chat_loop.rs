//! Main chat event loop
//!
//! Runs the terminal session: polls input events, renders frames, and drives
//! one completion request per user turn. The request runs on a spawned task
//! so the terminal keeps redrawing, but submission stays locked until the
//! turn's outcome arrives — there is never more than one request in flight.

use std::{error::Error, io, time::Duration};

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::api::client::{CompletionClient, CompletionError};
use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::core::config::EnvConfig;
use crate::ui::renderer::ui;

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run_chat(
    deployment: Option<String>,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut config = EnvConfig::from_env();
    if deployment.is_some() {
        config.deployment = deployment;
    }

    let client = CompletionClient::new(&config);
    let mut app = App::new(config, log_file)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop(
    terminal: &mut ChatTerminal,
    app: &mut App,
    client: &CompletionClient,
) -> Result<(), Box<dyn Error>> {
    // Channel carrying the single in-flight turn outcome
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, CompletionError>>();

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        // One turn at a time: ignore submissions while a
                        // reply is pending
                        if app.awaiting_reply || app.input.trim().is_empty() {
                            continue;
                        }

                        let input_text = std::mem::take(&mut app.input);
                        match process_input(app, &input_text) {
                            CommandResult::Continue => {}
                            CommandResult::ProcessAsMessage(text) => {
                                let api_messages = app.begin_turn(text);

                                let (width, height) = chat_viewport(terminal);
                                app.auto_scroll = true;
                                app.update_scroll_position(height, width);

                                let client = client.clone();
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let outcome = client.complete(api_messages).await;
                                    let _ = tx.send(outcome);
                                });
                            }
                        }
                    }
                    KeyCode::Char(c) => {
                        app.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => {
                        // Manual scroll disengages auto-scroll
                        app.auto_scroll = false;
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                    }
                    KeyCode::Down => {
                        let (width, height) = chat_viewport(terminal);
                        let max_scroll = app.calculate_max_scroll_offset(height, width);
                        app.scroll_offset = app.scroll_offset.saturating_add(1).min(max_scroll);
                        // Reaching the bottom re-engages auto-scroll
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.auto_scroll = false;
                        app.scroll_offset = app.scroll_offset.saturating_sub(3);
                    }
                    MouseEventKind::ScrollDown => {
                        let (width, height) = chat_viewport(terminal);
                        let max_scroll = app.calculate_max_scroll_offset(height, width);
                        app.scroll_offset = app.scroll_offset.saturating_add(3).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Apply the turn outcome if one arrived
        let mut received_any = false;
        while let Ok(outcome) = rx.try_recv() {
            app.finish_turn(outcome);
            let (width, height) = chat_viewport(terminal);
            app.update_scroll_position(height, width);
            received_any = true;
        }
        if received_any {
            continue; // Force a redraw after applying the outcome
        }
    }
}

/// Width and transcript height of the chat area: the full terminal minus the
/// three-row input box and the title line.
fn chat_viewport(terminal: &ChatTerminal) -> (u16, u16) {
    let size = terminal.size().unwrap_or_default();
    let height = size.height.saturating_sub(3).saturating_sub(1);
    (size.width, height)
}
