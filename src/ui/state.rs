// Application state management

use crate::config::{Config, EncoderConfig};
use crate::engine::worker::BatchWorker;
use crate::engine::{JobList, LogLine, ParamInput};
use crate::ui::constants::{
    AUDIO_BITRATE_OPTIONS, FRAME_RATE_OPTIONS, LOG_CAPACITY, QUALITY_OPTIONS,
};
use ratatui::widgets::ListState;
use std::collections::{BTreeSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Jobs,
    FrameRate,
    Quality,
    AudioBitrate,
    OutputDir,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Jobs,
        Focus::FrameRate,
        Focus::Quality,
        Focus::AudioBitrate,
        Focus::OutputDir,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,  // Navigation - global shortcuts active
    Editing, // Text entry - characters go to the edit buffer
}

/// What the edit buffer will be committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Field(Focus),
    AddPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Blocking notice, dismissed with Enter or Esc
    Alert { title: String, message: String },
    /// Quit requested while a batch is running
    QuitConfirm,
}

/// A parameter widget: free-text value plus preset options to cycle through
#[derive(Debug, Clone)]
pub struct ParamField {
    pub value: String,
    pub options: &'static [&'static str],
}

impl ParamField {
    pub fn new(value: impl Into<String>, options: &'static [&'static str]) -> Self {
        Self {
            value: value.into(),
            options,
        }
    }

    /// Step to the next/previous preset. A custom value jumps to the first
    /// preset going forward and the last going back.
    pub fn cycle(&mut self, forward: bool) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        let next = match self.options.iter().position(|o| *o == self.value.trim()) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.value = self.options[next].to_string();
    }
}

/// Scrollback for the progress log
#[derive(Debug, Clone, Default)]
pub struct LogView {
    pub lines: VecDeque<LogLine>,
    /// Lines scrolled up from the bottom; 0 follows new output
    pub scroll: usize,
}

impl LogView {
    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() >= LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        if self.scroll > 0 {
            // Keep the viewed region still while output arrives
            self.scroll = (self.scroll + 1).min(self.lines.len().saturating_sub(1));
        }
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = (self.scroll + amount).min(self.lines.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    /// The `height` lines to show, oldest first
    pub fn visible(&self, height: usize) -> impl Iterator<Item = &LogLine> {
        let end = self.lines.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(height);
        self.lines.range(start..end)
    }
}

pub struct AppState {
    pub jobs: JobList,
    pub marked: BTreeSet<usize>,
    pub list_state: ListState,

    pub frame_rate: ParamField,
    pub quality: ParamField,
    pub audio_bitrate: ParamField,
    pub output_dir: String,

    pub focus: Focus,
    pub input_mode: InputMode,
    pub edit_target: Option<EditTarget>,
    pub edit_buffer: String,

    pub log: LogView,
    pub modal: Option<Modal>,

    pub worker: BatchWorker,
    pub encoder: EncoderConfig,
    /// Start is disabled while this is set; cleared only by BatchComplete
    pub batch_running: bool,
    pub batch_size: usize,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let defaults = config.defaults.param_input();
        Self {
            jobs: JobList::new(),
            marked: BTreeSet::new(),
            list_state: ListState::default(),
            frame_rate: ParamField::new(defaults.frame_rate, FRAME_RATE_OPTIONS),
            quality: ParamField::new(defaults.quality_factor, QUALITY_OPTIONS),
            audio_bitrate: ParamField::new(defaults.audio_bitrate, AUDIO_BITRATE_OPTIONS),
            output_dir: config
                .defaults
                .output_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            focus: Focus::Jobs,
            input_mode: InputMode::Normal,
            edit_target: None,
            edit_buffer: String::new(),
            log: LogView::default(),
            modal: None,
            worker: BatchWorker::new(),
            encoder: config.encoder.clone(),
            batch_running: false,
            batch_size: 0,
            should_quit: false,
        }
    }

    /// Current parameter widget values
    pub fn param_input(&self) -> ParamInput {
        ParamInput {
            frame_rate: self.frame_rate.value.clone(),
            quality_factor: self.quality.value.clone(),
            audio_bitrate: self.audio_bitrate.value.clone(),
        }
    }

    pub fn field_mut(&mut self, focus: Focus) -> Option<&mut ParamField> {
        match focus {
            Focus::FrameRate => Some(&mut self.frame_rate),
            Focus::Quality => Some(&mut self.quality),
            Focus::AudioBitrate => Some(&mut self.audio_bitrate),
            Focus::Jobs | Focus::OutputDir => None,
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log.push(LogLine::info(message));
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log.push(LogLine::error(message));
    }

    pub fn alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.modal = Some(Modal::Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    /// Keep the highlighted row inside the list after it shrinks or grows
    pub fn clamp_selection(&mut self) {
        let len = self.jobs.len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }
}
