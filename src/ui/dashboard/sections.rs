use super::*;
use crate::engine::{LogLevel, display_name};
use crate::ui::state::{EditTarget, Focus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

const CURSOR: &str = "▏";

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", title))
}

impl Dashboard {
    pub(super) fn render_job_list(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let title = format!("Video files ({})", state.jobs.len());
        let block = panel_block(&title, state.focus == Focus::Jobs);

        if state.jobs.is_empty() {
            let hint = Paragraph::new(Line::from(vec![
                Span::raw("Press "),
                Span::styled("[A]", Style::default().fg(Color::Yellow)),
                Span::raw(" to add a file or folder"),
            ]))
            .style(Style::default().fg(Color::Gray))
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let items: Vec<ListItem> = state
            .jobs
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let marked = state.marked.contains(&i);
                let mark = if marked { "[x] " } else { "[ ] " };
                let style = if marked {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(display_name(path), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, area, &mut state.list_state);
    }

    pub(super) fn render_settings(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.focus != Focus::Jobs;
        let block = panel_block("Settings", focused);

        let editing = match state.edit_target {
            Some(EditTarget::Field(focus)) => Some(focus),
            _ => None,
        };

        let row = |label: &str, focus: Focus, value: &str| -> Line<'static> {
            let selected = state.focus == focus;
            let label_style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let shown = if editing == Some(focus) {
                format!("{}{}", state.edit_buffer, CURSOR)
            } else if value.is_empty() {
                "(not set)".to_string()
            } else {
                value.to_string()
            };

            let value_style = if editing == Some(focus) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(format!("{:<16}", label), label_style),
                Span::styled(shown, value_style),
            ])
        };

        let status = if state.batch_running {
            Span::styled(
                format!("encoding {} file(s)...", state.batch_size),
                Style::default().fg(Color::Green),
            )
        } else {
            Span::styled("ready", Style::default().fg(Color::Gray))
        };

        let lines = vec![
            row("Frame rate", Focus::FrameRate, &state.frame_rate.value),
            row("CRF (low=best)", Focus::Quality, &state.quality.value),
            row("Audio bitrate", Focus::AudioBitrate, &state.audio_bitrate.value),
            Line::from(Span::styled(
                "                'copy' keeps the original audio",
                Style::default().fg(Color::DarkGray),
            )),
            row("Output folder", Focus::OutputDir, &state.output_dir),
            Line::from(""),
            Line::from(vec![Span::raw("Status: "), status]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    pub(super) fn render_log(frame: &mut Frame, area: Rect, state: &AppState) {
        let title = if state.log.scroll > 0 {
            format!("Progress (scrolled {} lines)", state.log.scroll)
        } else {
            "Progress".to_string()
        };
        let block = panel_block(&title, false);
        let height = block.inner(area).height as usize;

        let lines: Vec<Line> = state
            .log
            .visible(height)
            .map(|line| {
                let style = match line.level {
                    LogLevel::Error => Style::default().fg(Color::Red),
                    LogLevel::Tool => Style::default().fg(Color::DarkGray),
                    LogLevel::Info => Style::default().fg(Color::White),
                };
                Line::from(vec![
                    Span::styled(
                        format!("{} ", line.timestamp.format("%H:%M:%S")),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(line.display_text(), style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    pub(super) fn render_add_prompt(frame: &mut Frame, state: &AppState) {
        if state.edit_target != Some(EditTarget::AddPath) {
            return;
        }

        let area = frame.area();
        let width = 70.min(area.width.saturating_sub(4));
        let prompt_area = Rect {
            x: (area.width.saturating_sub(width)) / 2,
            y: area.height / 3,
            width,
            height: 3.min(area.height),
        };

        frame.render_widget(Clear, prompt_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Add file or folder ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));

        let input = Paragraph::new(format!("{}{}", state.edit_buffer, CURSOR))
            .style(Style::default().fg(Color::White))
            .block(block);

        frame.render_widget(input, prompt_area);
    }
}
