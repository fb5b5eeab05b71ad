// Blocking notice for validation problems

use crate::ui::components::modal_frame;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub struct AlertModal;

impl AlertModal {
    pub fn render(frame: &mut Frame, title: &str, message: &str) {
        let color = if title == "Error" {
            Color::Red
        } else {
            Color::Yellow
        };
        let inner = modal_frame(frame, 56, 7, title, color);

        let lines = vec![
            Line::from(""),
            Line::styled(message.to_string(), Style::default().fg(Color::White)),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[Enter]",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" OK"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, inner);
    }
}
