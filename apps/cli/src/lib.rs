pub mod config;
pub mod main_lib;
pub mod snapshot_file;

pub use main_lib::{build_state, init_tracing, render_outcome, AppState};
