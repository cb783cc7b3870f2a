//! Newsletter step rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use crate::ui::wizard::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_newsletter_step(&mut self, frame: &mut Frame) {
        let inner = self.render_step_frame(frame, &self.tr("Newsletter"));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(10),   // Signup form
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        if let Some(widget) = self.signup.as_mut() {
            widget.render(frame, chunks[0], &self.indicator);
        }

        let footer =
            Paragraph::new(self.footer_line(&[("Tab", "continue"), ("Esc", "back")]))
                .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[1]);
    }
}
