//! Welcome step rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::wizard::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_welcome_step(&self, frame: &mut Frame) {
        let inner = self.render_step_frame(frame, &self.tr("Welcome"));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Min(3),    // Description
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            self.tr("Welcome aboard!"),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let desc = Paragraph::new(vec![
            Line::from(self.tr("Let's finish setting up your account.")),
            Line::from(""),
            Line::from(self.tr("Next you can subscribe to our newsletter.")),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(desc, chunks[2]);

        let footer = Paragraph::new(self.footer_line(&[("Enter", "next"), ("Esc", "quit")]))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }
}
