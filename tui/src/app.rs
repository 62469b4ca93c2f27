//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - CoordinatorClient for session logic
//! - DisplayState for rendering
//!
//! # Architecture
//!
//! The App is a thin client that:
//! 1. Converts terminal events to UiEvents
//! 2. Sends events to the embedded Coordinator via CoordinatorClient
//! 3. Receives CoordinatorMessages and updates DisplayState
//! 4. Renders the active screen based on DisplayState

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use docchat_core::{
    ConfigOverrides, CoordinatorState, NotifyLevel, Screen, TurnKind, TurnRole,
};

use crate::client::CoordinatorClient;
use crate::display::{role_prefix, DisplayState};
use crate::picker::expand_path;
use crate::theme::{
    ACCENT_TEAL, DIM_GRAY, ERROR_RED, SELECT_BLUE, SUCCESS_GREEN, USER_GREEN, WARN_AMBER,
};

/// Input box height (lines) for text wrapping
const INPUT_HEIGHT: u16 = 3;

/// Sidebar width on the chat screen
const SIDEBAR_WIDTH: u16 = 28;

/// Questions suggested on an empty transcript
const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are these documents about?",
    "Summarize the key points.",
    "What conclusions do the documents reach?",
];

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,

    // === Coordinator Integration ===
    /// Client for communicating with the embedded Coordinator
    client: CoordinatorClient,
    /// Display state derived from CoordinatorMessages
    display: DisplayState,
    /// Files passed on the command line, staged once startup finishes
    initial_files: Vec<PathBuf>,

    // === Input State ===
    /// Text buffer for the focused input (path or question)
    input_buffer: String,
    /// Selected index in the staged-document list
    selected_staged: usize,
    /// Transcript scroll offset (lines from bottom, 0 = latest)
    scroll_offset: usize,
    /// Total rendered transcript lines (for scroll bounds)
    total_lines: usize,
    /// Whether the sidebar is visible on the chat screen
    sidebar_visible: bool,

    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create a new App instance
    pub fn new(overrides: ConfigOverrides, initial_files: Vec<PathBuf>) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        let client = CoordinatorClient::new(&overrides)?;

        Ok(Self {
            running: true,
            client,
            display: DisplayState::new(),
            initial_files,
            input_buffer: String::new(),
            selected_staged: 0,
            scroll_offset: 0,
            total_lines: 0,
            sidebar_visible: true,
            size,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~10 FPS is plenty for a text UI
        let frame_duration = Duration::from_millis(100);

        let mut event_stream = EventStream::new();

        self.client.start().await?;

        // Command-line files behave like a drop onto the upload screen
        if !self.initial_files.is_empty() {
            let files = std::mem::take(&mut self.initial_files);
            self.client.get_started().await?;
            self.client.drop_documents(files).await?;
        }

        // Render initial frame immediately so the user sees UI
        self.process_messages();
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key).await;
                            }
                            Event::Resize(w, h) => {
                                self.size = (w, h);
                            }
                            _ => {}
                        }
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            // Settle any completed backend call
            self.client.poll_pending().await;

            // Receive and process messages from the Coordinator
            self.process_messages();

            // Render
            self.render(terminal)?;

            if self.display.quitting {
                self.running = false;
            }

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Process all pending messages from the Coordinator
    fn process_messages(&mut self) {
        for msg in self.client.recv_all() {
            self.display.apply_message(msg);
        }
        // Keep the staged selection in bounds after removals
        if self.selected_staged >= self.display.staged.len() {
            self.selected_staged = self.display.staged.len().saturating_sub(1);
        }
    }

    // ========================================================================
    // Input handling
    // ========================================================================

    async fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let _ = self.client.request_quit().await;
            return;
        }

        match self.display.screen {
            Screen::Landing => self.handle_landing_key(key).await,
            Screen::Upload => self.handle_upload_key(key).await,
            Screen::Chat => self.handle_chat_key(key).await,
        }
    }

    async fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let _ = self.client.get_started().await;
            }
            KeyCode::Esc => {
                let _ = self.client.request_quit().await;
            }
            _ => {}
        }
    }

    async fn handle_upload_key(&mut self, key: KeyEvent) {
        let busy = self.display.coordinator_state.is_busy();
        match key.code {
            KeyCode::Esc => {
                let _ = self.client.go_back().await;
                self.input_buffer.clear();
            }

            // Submit the typed path for staging
            KeyCode::Enter if !busy => {
                let input = std::mem::take(&mut self.input_buffer);
                let trimmed = input.trim();
                if !trimmed.is_empty() {
                    let paths = expand_path(trimmed);
                    if paths.is_empty() {
                        self.display.notice = Some(crate::display::Notice {
                            level: NotifyLevel::Warning,
                            message: format!("No files found at '{trimmed}'"),
                        });
                    } else {
                        let _ = self.client.pick_documents(paths).await;
                    }
                }
            }

            // Submit the staged set
            KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.client.process_documents().await;
            }

            // Staged list navigation and removal
            KeyCode::Up => {
                self.selected_staged = self.selected_staged.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_staged + 1 < self.display.staged.len() {
                    self.selected_staged += 1;
                }
            }
            KeyCode::Delete if !busy => {
                if !self.display.staged.is_empty() {
                    let _ = self.client.remove_document(self.selected_staged).await;
                }
            }

            // Path input editing
            KeyCode::Char(c) if !busy => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }

            _ => {}
        }
    }

    async fn handle_chat_key(&mut self, key: KeyEvent) {
        let busy = !can_submit_question(&self.display);
        match key.code {
            KeyCode::Esc => {
                let _ = self.client.go_back().await;
                self.input_buffer.clear();
                self.scroll_offset = 0;
            }

            KeyCode::Char('b') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.client.go_back().await;
                self.input_buffer.clear();
                self.scroll_offset = 0;
            }

            // Toggle the document sidebar
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.sidebar_visible = !self.sidebar_visible;
            }

            // Submit question. The buffer is cleared only once the
            // Coordinator accepts it, so a refused submission (answer
            // outstanding, over the length cap) keeps the typed text.
            KeyCode::Enter if !busy => {
                if !self.input_buffer.trim().is_empty() {
                    let _ = self.client.ask(self.input_buffer.clone()).await;
                    if self.client.state() == CoordinatorState::Thinking {
                        self.input_buffer.clear();
                        self.scroll_offset = 0;
                    }
                }
            }

            // Suggested questions on an empty transcript (1-3)
            KeyCode::Char(c @ '1'..='3')
                if !busy
                    && self.display.transcript.is_empty()
                    && self.input_buffer.is_empty() =>
            {
                let index = (c as usize) - ('1' as usize);
                if let Some(question) = SUGGESTED_QUESTIONS.get(index) {
                    let _ = self.client.ask((*question).to_string()).await;
                }
            }

            // Transcript scrolling
            KeyCode::PageUp => {
                let page = (self.size.1.saturating_sub(INPUT_HEIGHT + 2) / 2) as usize;
                let max_scroll = self.total_lines.saturating_sub(1);
                self.scroll_offset = (self.scroll_offset + page).min(max_scroll);
            }
            KeyCode::PageDown => {
                let page = (self.size.1.saturating_sub(INPUT_HEIGHT + 2) / 2) as usize;
                self.scroll_offset = self.scroll_offset.saturating_sub(page);
            }

            // Question input editing
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }

            _ => {}
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            match self.display.screen {
                Screen::Landing => Self::render_landing(frame, area),
                Screen::Upload => self.render_upload(frame, area),
                Screen::Chat => self.render_chat(frame, area),
            }
            self.render_status_line(frame, area);
        })?;
        Ok(())
    }

    fn render_landing(frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(6),
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "DocChat",
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Chat with your PDFs."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to get started  -  Esc to quit",
                Style::default().fg(DIM_GRAY),
            )),
        ])
        .alignment(Alignment::Center);

        frame.render_widget(title, chunks[1]);
    }

    fn render_upload(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        // Path input
        let input = Paragraph::new(self.input_buffer.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Add PDFs (type a file or directory path, Enter to stage) "),
            )
            .style(Style::default().fg(USER_GREEN));
        frame.render_widget(input, chunks[0]);

        // Staged list
        let submitting = self.display.coordinator_state == CoordinatorState::Uploading;
        let items: Vec<ListItem> = self
            .display
            .staged
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == self.selected_staged && !submitting {
                    Style::default().fg(SELECT_BLUE).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("  {name}")).style(style)
            })
            .collect();

        let title = if submitting {
            " Staged documents (processing...) "
        } else {
            " Staged documents (Up/Down select, Del remove, Ctrl+P process) "
        };
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, chunks[1]);

        // Inline error / notice area
        let mut lines = Vec::new();
        if let Some(ref error) = self.display.upload_error {
            lines.push(Line::from(Span::styled(
                format!("Upload failed: {error} - your files are still staged, Ctrl+P to retry"),
                Style::default().fg(ERROR_RED),
            )));
        }
        if let Some(ref notice) = self.display.notice {
            lines.push(Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(notice_color(notice.level)),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[2]);
    }

    fn render_chat(&mut self, frame: &mut Frame, area: Rect) {
        // Narrow terminals get the full width for the transcript
        let show_sidebar = self.sidebar_visible && sidebar_fits(area.width);
        let horizontal = if show_sidebar {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
                .split(area)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20)])
                .split(area)
        };

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
            ])
            .split(horizontal[0]);

        self.render_transcript(frame, main[0]);

        // Question input
        let input = Paragraph::new(self.input_buffer.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Ask a question (Enter to send, Ctrl+B back, Ctrl+F sidebar) "),
            )
            .style(Style::default().fg(USER_GREEN));
        frame.render_widget(input, main[1]);

        // Sidebar with processed documents
        if show_sidebar {
            let items: Vec<ListItem> = self
                .display
                .processed
                .iter()
                .map(|name| ListItem::new(format!(" {name}")))
                .collect();
            let sidebar = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Documents "))
                .style(Style::default().fg(DIM_GRAY));
            frame.render_widget(sidebar, horizontal[1]);
        }
    }

    fn render_transcript(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(2).max(10) as usize;
        let mut lines: Vec<Line> = Vec::new();

        if self.display.transcript.is_empty() {
            lines.push(Line::from(Span::styled(
                "Your documents are ready. Ask anything, or press a number:",
                Style::default().fg(DIM_GRAY),
            )));
            lines.push(Line::from(""));
            for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("  {}. {question}", i + 1),
                    Style::default().fg(ACCENT_TEAL),
                )));
            }
        }

        for turn in &self.display.transcript {
            let (prefix_style, body_style) = match (turn.role, turn.kind) {
                (TurnRole::User, _) => (
                    Style::default().fg(USER_GREEN).add_modifier(Modifier::BOLD),
                    Style::default(),
                ),
                (TurnRole::Assistant, TurnKind::Error) => (
                    Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
                    Style::default().fg(ERROR_RED),
                ),
                (TurnRole::Assistant, TurnKind::Plain) => (
                    Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
                    Style::default(),
                ),
            };

            let content = if turn.pending {
                "thinking...".to_string()
            } else {
                turn.content.clone()
            };
            let body_style = if turn.pending {
                Style::default().fg(DIM_GRAY).add_modifier(Modifier::ITALIC)
            } else {
                body_style
            };

            let prefix = role_prefix(turn.role);
            for (i, wrapped) in textwrap::wrap(&content, width.saturating_sub(prefix.len()))
                .iter()
                .enumerate()
            {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(prefix, prefix_style),
                        Span::styled(wrapped.to_string(), body_style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(
                        format!("{}{wrapped}", " ".repeat(prefix.len())),
                        body_style,
                    )));
                }
            }
            lines.push(Line::from(""));
        }

        self.total_lines = lines.len();

        // Scroll from the bottom
        let visible = area.height.saturating_sub(2) as usize;
        let start = self
            .total_lines
            .saturating_sub(visible + self.scroll_offset);
        let shown: Vec<Line> = lines.into_iter().skip(start).collect();

        let transcript = Paragraph::new(shown)
            .block(Block::default().borders(Borders::ALL).title(" Conversation "))
            .wrap(Wrap { trim: false });
        frame.render_widget(transcript, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
        let state = self.display.coordinator_state;
        let style = match state {
            CoordinatorState::Ready => Style::default().fg(SUCCESS_GREEN),
            CoordinatorState::Uploading | CoordinatorState::Thinking => {
                Style::default().fg(WARN_AMBER)
            }
            _ => Style::default().fg(DIM_GRAY),
        };
        let clock = chrono::Local::now().format("%H:%M").to_string();
        let status = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {}", state.description()), style),
            Span::styled(
                format!("  {clock}"),
                Style::default().fg(DIM_GRAY),
            ),
        ]));
        frame.render_widget(status, status_area);
    }
}

fn notice_color(level: NotifyLevel) -> ratatui::style::Color {
    match level {
        NotifyLevel::Info => DIM_GRAY,
        NotifyLevel::Warning => WARN_AMBER,
        NotifyLevel::Error => ERROR_RED,
        NotifyLevel::Success => SUCCESS_GREEN,
    }
}

/// A new question may only go out while the session is settled: no upload
/// or answer in flight, and no pending placeholder in the transcript.
fn can_submit_question(display: &DisplayState) -> bool {
    !display.coordinator_state.is_busy() && !display.awaiting_answer()
}

/// Whether the terminal is wide enough to show the sidebar next to a
/// usable transcript pane.
fn sidebar_fits(width: u16) -> bool {
    width >= SIDEBAR_WIDTH + 40
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_core::{ChatTurn, CoordinatorMessage};

    #[test]
    fn test_question_blocked_while_answer_outstanding() {
        let mut display = DisplayState::new();
        display.coordinator_state = CoordinatorState::Ready;
        assert!(can_submit_question(&display));

        display.apply_message(CoordinatorMessage::TurnAdded {
            turn: ChatTurn::user("what is this about?".to_string()),
        });
        display.apply_message(CoordinatorMessage::TurnAdded {
            turn: ChatTurn::placeholder(),
        });
        assert!(!can_submit_question(&display));
    }

    #[test]
    fn test_question_blocked_while_coordinator_busy() {
        let mut display = DisplayState::new();
        display.coordinator_state = CoordinatorState::Thinking;
        assert!(!can_submit_question(&display));

        display.coordinator_state = CoordinatorState::Ready;
        assert!(can_submit_question(&display));
    }

    #[test]
    fn test_sidebar_collapses_on_narrow_terminal() {
        assert!(sidebar_fits(120));
        assert!(sidebar_fits(SIDEBAR_WIDTH + 40));
        assert!(!sidebar_fits(SIDEBAR_WIDTH + 39));
        assert!(!sidebar_fits(50));
    }
}
