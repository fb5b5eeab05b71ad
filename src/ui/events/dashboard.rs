use super::*;
use crate::engine::start_batch;
use crate::ui::state::{EditTarget, Focus, InputMode};
use std::path::Path;

/// Route a key press according to the open modal, input mode and focus
pub fn handle_key(key: KeyEvent, state: &mut AppState) {
    if state.modal.is_some() {
        handle_modal_key(key, state);
        return;
    }

    if state.input_mode == InputMode::Editing {
        handle_editing_key(key, state);
        return;
    }

    if is_ctrl_c(&key) {
        request_quit(state);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => request_quit(state),
        KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::BackTab => state.focus = state.focus.prev(),
        KeyCode::Up => move_selection(state, -1),
        KeyCode::Down => move_selection(state, 1),
        KeyCode::Left => cycle_field(state, false),
        KeyCode::Right => cycle_field(state, true),
        KeyCode::PageUp => state.log.scroll_up(10),
        KeyCode::PageDown => state.log.scroll_down(10),
        KeyCode::Enter => begin_edit_focused(state),
        KeyCode::Char(' ') => toggle_mark(state),
        KeyCode::Char('a') | KeyCode::Char('A') => {
            state.edit_target = Some(EditTarget::AddPath);
            state.edit_buffer.clear();
            state.input_mode = InputMode::Editing;
        }
        KeyCode::Char('d') | KeyCode::Char('D') => remove_selected(state),
        KeyCode::Char('x') | KeyCode::Char('X') => clear_jobs(state),
        KeyCode::Char('s') | KeyCode::Char('S') => start_compression(state),
        _ => {}
    }
}

fn handle_modal_key(key: KeyEvent, state: &mut AppState) {
    match state.modal {
        Some(Modal::Alert { .. }) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                state.modal = None;
            }
        }
        Some(Modal::QuitConfirm) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => state.should_quit = true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.modal = None,
            _ => {}
        },
        None => {}
    }
}

fn handle_editing_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => commit_edit(state),
        KeyCode::Esc => end_edit(state),
        KeyCode::Backspace => {
            state.edit_buffer.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.edit_buffer.push(c);
        }
        _ => {}
    }
}

fn end_edit(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.edit_target = None;
    state.edit_buffer.clear();
}

fn begin_edit_focused(state: &mut AppState) {
    let current = match state.focus {
        Focus::Jobs => return,
        Focus::OutputDir => state.output_dir.clone(),
        focus => match state.field_mut(focus) {
            Some(field) => field.value.clone(),
            None => return,
        },
    };
    state.edit_buffer = current;
    state.edit_target = Some(EditTarget::Field(state.focus));
    state.input_mode = InputMode::Editing;
}

fn commit_edit(state: &mut AppState) {
    let text = state.edit_buffer.trim().to_string();
    let target = state.edit_target;
    end_edit(state);

    match target {
        Some(EditTarget::AddPath) => {
            if !text.is_empty() {
                add_path(state, Path::new(&text));
            }
        }
        Some(EditTarget::Field(Focus::OutputDir)) => {
            state.output_dir = text;
            if !state.output_dir.is_empty() {
                let message = format!("output directory set: {}", state.output_dir);
                state.log_info(message);
            }
        }
        Some(EditTarget::Field(focus)) => {
            // Free text is kept as typed; it is only checked when a batch starts
            if let Some(field) = state.field_mut(focus) {
                field.value = text;
            }
        }
        None => {}
    }
}

/// Add a file, or every video file under a directory
pub(super) fn add_path(state: &mut AppState, path: &Path) {
    let added = if path.is_dir() {
        match state.jobs.add_directory(path) {
            Ok(n) => n,
            Err(e) => {
                state.log_error(format!("could not read {}: {:#}", path.display(), e));
                return;
            }
        }
    } else if path.is_file() {
        usize::from(state.jobs.add(path))
    } else {
        state.log_error(format!("no such file: {}", path.display()));
        return;
    };

    state.clamp_selection();
    state.log_info(format!("{} file(s) added.", added));
}

fn move_selection(state: &mut AppState, delta: isize) {
    if state.focus != Focus::Jobs || state.jobs.is_empty() {
        return;
    }
    let last = state.jobs.len() - 1;
    let current = state.list_state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(last);
    state.list_state.select(Some(next));
}

fn cycle_field(state: &mut AppState, forward: bool) {
    let focus = state.focus;
    if let Some(field) = state.field_mut(focus) {
        field.cycle(forward);
    }
}

fn toggle_mark(state: &mut AppState) {
    if state.focus != Focus::Jobs {
        return;
    }
    if let Some(index) = state.list_state.selected() {
        if index < state.jobs.len() && !state.marked.remove(&index) {
            state.marked.insert(index);
        }
    }
}

/// Remove marked items, or the highlighted one when nothing is marked
pub(super) fn remove_selected(state: &mut AppState) {
    let indices: Vec<usize> = if state.marked.is_empty() {
        state.list_state.selected().into_iter().collect()
    } else {
        state.marked.iter().copied().collect()
    };

    if indices.is_empty() || state.jobs.is_empty() {
        state.alert("Warning", "Select the files to remove first.");
        return;
    }

    let removed = state.jobs.remove_indices(&indices);
    state.marked.clear();
    state.clamp_selection();
    state.log_info(format!("{} file(s) removed from the list.", removed));
}

fn clear_jobs(state: &mut AppState) {
    state.jobs.clear();
    state.marked.clear();
    state.clamp_selection();
    state.log_info("file list cleared.");
}

/// Validate, snapshot the job list and hand the batch to the worker
pub(super) fn start_compression(state: &mut AppState) {
    if state.batch_running {
        return;
    }

    let output_dir = PathBuf::from(state.output_dir.trim());
    let request = match start_batch(&state.jobs.snapshot(), &output_dir, &state.param_input()) {
        Ok(request) => request,
        Err(e) => {
            state.alert("Error", capitalize(&e.to_string()));
            return;
        }
    };

    let total = request.files.len();
    tracing::info!(batch = %request.id, files = total, "starting batch from TUI");

    match state.worker.spawn(request, state.encoder.clone()) {
        Ok(()) => {
            state.batch_running = true;
            state.batch_size = total;
            state.log_info("starting compression...");
        }
        Err(e) => state.alert("Error", format!("{:#}", e)),
    }
}

fn request_quit(state: &mut AppState) {
    if state.batch_running {
        state.modal = Some(Modal::QuitConfirm);
    } else {
        state.should_quit = true;
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
