// Dashboard screen implementation

use crate::ui::components::Footer;
use crate::ui::state::{AppState, InputMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Widget,
};

mod sections;

pub struct Dashboard;

impl Dashboard {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(12), // Job list + settings
                Constraint::Min(5),     // Progress log
                Constraint::Length(1),  // Footer
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        Self::render_job_list(frame, top[0], state);
        Self::render_settings(frame, top[1], state);
        Self::render_log(frame, chunks[1], state);

        let footer = if state.input_mode == InputMode::Editing {
            Footer::editing()
        } else {
            Footer::dashboard(state.jobs.len(), state.marked.len(), state.batch_running)
        };
        footer.render(chunks[2], frame.buffer_mut());

        Self::render_add_prompt(frame, state);
    }
}
