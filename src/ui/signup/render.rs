//! Signup form rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{Polarity, SignupWidget};
use crate::ui::indicator::LoadingIndicator;

const DEFAULT_TITLE: &str = "Subscribe to our newsletter";
const DEFAULT_LABEL: &str = "Email address";

impl SignupWidget {
    /// Draw the form into `area`. Draws nothing when the step is skipped.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, indicator: &dyn LoadingIndicator) {
        if !self.is_rendered() {
            return;
        }

        let title = self.tr(self.properties.title.as_deref().unwrap_or(DEFAULT_TITLE));
        let label = self.tr(self.properties.label.as_deref().unwrap_or(DEFAULT_LABEL));

        let mut notices: Vec<Line> = Vec::new();
        for notice in [
            self.properties.free_account_notice.as_deref(),
            self.properties.gdpr_notice.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            notices.push(Line::from(Span::styled(
                self.tr(notice),
                Style::default().fg(Color::Gray),
            )));
        }
        let notices_height = if notices.is_empty() {
            0
        } else {
            (notices.len() as u16 * 2).min(6)
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),              // Title
                Constraint::Length(1),              // Spacer
                Constraint::Length(3),              // Email field
                Constraint::Length(notices_height), // Notices
                Constraint::Length(1),              // Spacer
                Constraint::Min(2),                 // Status
                Constraint::Length(1),              // Footer
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, chunks[0]);

        let focused = !self.state.is_submitting();
        self.email.render(frame, chunks[2], &label, focused);

        if !notices.is_empty() {
            frame.render_widget(
                Paragraph::new(notices).wrap(Wrap { trim: true }),
                chunks[3],
            );
        }

        if let Some(status) = self.status() {
            let (symbol, color) = match status.polarity {
                Polarity::Success => ("✓ ", Color::Green),
                Polarity::Error => ("✗ ", Color::Red),
            };
            let paragraph = Paragraph::new(Line::from(vec![
                Span::styled(
                    symbol,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(status.text, Style::default().fg(color)),
            ]))
            .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, chunks[5]);
        }

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}", self.tr("sign up"))),
        ]));
        frame.render_widget(footer, chunks[6]);

        if self.state.is_submitting() {
            indicator.render_indicator(frame, area);
        }
    }
}
