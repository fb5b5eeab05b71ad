// Terminal UI using Ratatui

pub mod alert_modal;
pub mod components;
pub mod constants;
pub mod dashboard;
pub mod events;
pub mod quit_modal;
pub mod state;

pub use alert_modal::AlertModal;
pub use dashboard::Dashboard;
pub use events::{UiOptions, run_ui};
pub use quit_modal::QuitModal;
pub use state::AppState;
