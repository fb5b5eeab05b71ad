// Reusable UI components

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Clear a centred box of at most `width` x `height`, draw a titled border
/// around it and return the area inside the border
pub fn modal_frame(frame: &mut Frame, width: u16, height: u16, title: &str, color: Color) -> Rect {
    let area = frame.area();
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let modal_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    inner
}

pub struct Footer {
    content: Line<'static>,
}

impl Footer {
    pub fn dashboard(total: usize, marked: usize, running: bool) -> Self {
        let status = if running { "encoding" } else { "idle" };
        let stats_text = format!(
            "Files: {}, Marked: {}, Status: {}  |  ",
            total, marked, status
        );

        let mut spans = vec![Span::raw(stats_text)];

        let controls: &[(&str, &str)] = if running {
            &[("[PgUp/PgDn]", " Scroll"), ("[Q]", "uit")]
        } else {
            &[
                ("[A]", "dd"),
                ("[Space]", " Mark"),
                ("[D]", "elete"),
                ("[X]", " Clear"),
                ("[Tab]", " Focus"),
                ("[←/→]", " Preset"),
                ("[Enter]", " Edit"),
                ("[S]", "tart"),
                ("[Q]", "uit"),
            ]
        };

        for (i, (hotkey, desc)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(*desc));
        }

        Self {
            content: Line::from(spans),
        }
    }

    pub fn editing() -> Self {
        let controls = [("[Enter]", "Confirm"), ("[Esc]", "Cancel")];

        let mut spans = vec![Span::raw("EDITING: ")];
        for (i, (hotkey, desc)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" "));
            spans.push(Span::raw(*desc));
        }

        Self {
            content: Line::from(spans),
        }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content).render(area, buf);
    }
}
