// Batch compression engine - independent of UI

pub mod batch;
pub mod core;
pub mod validate;
pub mod worker;

pub use batch::{BatchEvent, run_batch, start_batch};
pub use core::*;
pub use validate::ValidationError;
