//! Final step rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::wizard::WizardScreen;

impl WizardScreen {
    pub(crate) fn render_success_step(&mut self, frame: &mut Frame) {
        let inner = self.render_step_frame(frame, &self.tr("All set"));

        // The form stays available here until a signup is recorded
        let show_form = self.signup.is_some() && !self.context().skips_signup();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),                           // Completion
                Constraint::Min(if show_form { 10 } else { 0 }), // Signup form
                Constraint::Length(1),                           // Footer
            ])
            .split(inner);

        let completion = Paragraph::new(vec![
            Line::from(Span::styled(
                self.tr("Setup complete!"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(if self.context().has_recorded_signup() {
                self.tr("You're subscribed to the newsletter.")
            } else {
                self.tr("You can still subscribe below.")
            }),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(completion, chunks[0]);

        if let Some(widget) = self.signup.as_mut() {
            widget.render(frame, chunks[1], &self.indicator);
        }

        let hints: &[(&str, &str)] = if show_form {
            &[("Tab", "finish"), ("Esc", "back")]
        } else {
            &[("Enter", "finish"), ("Esc", "back")]
        };
        let footer = Paragraph::new(self.footer_line(hints)).alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }
}
