// Event handling and main UI loop

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::ui::{
    AlertModal, Dashboard, QuitModal,
    constants::WORKER_MESSAGES_PER_FRAME,
    state::{AppState, Modal},
};

mod dashboard;
mod workers;

pub use dashboard::handle_key;
pub use workers::handle_worker_message;

/// What the TUI starts with
#[derive(Debug, Clone, Default)]
pub struct UiOptions {
    /// Files or directories to pre-load into the job list
    pub paths: Vec<PathBuf>,
    /// Output directory to preselect
    pub output_dir: Option<PathBuf>,
}

// Event types sent from dedicated event thread to main loop
enum UiEvent {
    Input(Event), // Keyboard, mouse, or other terminal events
    Tick,         // Periodic wake-up to drain worker messages and redraw
}

/// Spawn a dedicated thread for event polling.
fn spawn_event_thread(tx: mpsc::Sender<UiEvent>) {
    let tick_rate = Duration::from_millis(33);

    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(UiEvent::Tick).is_err() {
                    break;
                }
                last_tick = Instant::now();
            }
        }
    });
}

/// Seed the state from command-line paths and output directory
pub fn apply_options(state: &mut AppState, options: UiOptions) {
    if let Some(dir) = options.output_dir {
        state.output_dir = dir.display().to_string();
        state.log_info(format!("output directory set: {}", state.output_dir));
    }

    for path in options.paths {
        dashboard::add_path(state, &path);
    }
}

pub fn run_ui(options: UiOptions, config: &Config) -> io::Result<()> {
    let mut app_state = AppState::new(config);
    apply_options(&mut app_state, options);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_thread(event_tx);

    let result = run_app(&mut terminal, &mut app_state, event_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    event_rx: Receiver<UiEvent>,
) -> io::Result<()> {
    loop {
        let mut pending_inputs: Vec<Event> = Vec::new();

        // Always block for at least one event, then drain the queue
        match event_rx.recv() {
            Ok(UiEvent::Input(ev)) => pending_inputs.push(ev),
            Ok(UiEvent::Tick) => {}
            Err(_) => return Ok(()), // Event thread gone
        }
        while let Ok(evt) = event_rx.try_recv() {
            if let UiEvent::Input(ev) = evt {
                pending_inputs.push(ev);
            }
        }

        for input in pending_inputs {
            if let Event::Key(key) = input {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    handle_key(key, state);
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }

        // Apply worker output on this thread; bounded so a chatty encoder
        // cannot starve input handling
        for msg in state.worker.drain(WORKER_MESSAGES_PER_FRAME) {
            handle_worker_message(msg, state);
        }

        terminal.draw(|frame| {
            Dashboard::render(frame, state);

            match &state.modal {
                Some(Modal::Alert { title, message }) => AlertModal::render(frame, title, message),
                Some(Modal::QuitConfirm) => QuitModal::render(frame, state.batch_size),
                None => {}
            }
        })?;
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
