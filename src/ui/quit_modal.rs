// Confirmation before abandoning a running batch

use crate::ui::components::modal_frame;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct QuitModal;

impl QuitModal {
    pub fn render(frame: &mut Frame, batch_size: usize) {
        let inner = modal_frame(frame, 50, 7, "Quit Confirmation", Color::Yellow);

        let noun = if batch_size == 1 { "file" } else { "files" };
        let key = |label: &'static str, color: Color| {
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let lines = vec![
            Line::from(""),
            Line::raw(format!("Still encoding a batch of {} {}.", batch_size, noun)),
            Line::styled(
                "Quitting abandons the remaining files.",
                Style::default().fg(Color::Gray),
            ),
            Line::from(""),
            Line::from(vec![
                key("[Y]", Color::Green),
                Span::raw(" Quit   "),
                key("[N]", Color::Red),
                Span::raw(" Cancel"),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::White)),
            inner,
        );
    }
}
