//! Single-line email input backed by tui-textarea
//!
//! The signup widget reads the value only when the user submits; nothing
//! tracks or validates it per keystroke.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

pub struct EmailInput {
    textarea: TextArea<'static>,
}

impl EmailInput {
    pub fn new(initial: Option<&str>, placeholder: &str) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(placeholder);
        textarea.set_cursor_line_style(Style::default());
        if let Some(value) = initial {
            textarea.insert_str(value);
        }
        Self { textarea }
    }

    /// Current contents of the field
    pub fn value(&self) -> String {
        self.textarea.lines().concat()
    }

    /// Replace the field contents
    pub fn set_value(&mut self, new_value: &str) {
        self.textarea.select_all();
        self.textarea.cut();
        self.textarea.insert_str(new_value);
    }

    /// Insert pasted text at the cursor. Only the first line is kept.
    pub fn paste(&mut self, text: &str) -> bool {
        let line = text.lines().next().unwrap_or_default();
        self.textarea.insert_str(line)
    }

    /// Handle a key event, returns true if the key was consumed.
    ///
    /// Keys that drive the form (Enter, Tab, Esc) are left to the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => false,
            _ => self.textarea.input(key),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        self.textarea.set_block(
            Block::default()
                .title(format!(" {label} "))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        self.textarea.set_cursor_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        frame.render_widget(&self.textarea, area);
    }
}
