//! # artfolio-client
//!
//! The contract the presentation layer programs against.  An [`AppState`]
//! holds the open catalog and the signed-in session; the functions in
//! [`commands`] are the only entry points a screen needs, and every one of
//! them turns failures into a `bool`, an empty list or a short message.

pub mod commands;
pub mod state;

use artfolio_shared::constants::APP_NAME;
use tracing_subscriber::{fmt, EnvFilter};

pub use state::AppState;

/// Install the global tracing subscriber (respects `RUST_LOG`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("artfolio_client=debug,artfolio_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    tracing::info!("{APP_NAME} catalog v{}", env!("CARGO_PKG_VERSION"));
}
