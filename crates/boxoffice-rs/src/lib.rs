//! Public SDK surface for the box-office predictor.
//!
//! Re-exports the building blocks and hosts the `boxoffice` command line.

pub mod cli;

/// Re-export for convenience.
pub use boxoffice_rs_client as client;
/// Re-export for convenience.
pub use boxoffice_rs_config as config;
pub use boxoffice_rs_core as core;
/// Re-export for convenience.
pub use boxoffice_rs_history as history;
pub use boxoffice_rs_model as model;
pub use boxoffice_rs_tui as tui;

/// Initialize logging with millisecond timestamps, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}
